//! Core primitives.
//!
//! Seeded randomness and screen coordinates shared by the game modules.

pub mod point;
pub mod rng;

// Re-export core types
pub use point::Point;
pub use rng::{DeterministicRng, derive_session_seed};
