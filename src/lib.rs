//! # Chooser Game
//!
//! Gameplay core for a touch-to-choose party game: everyone puts a finger on
//! the screen, one player is picked at random and gets a physical task to
//! finish before the countdown runs out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CHOOSER GAME                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Primitives                               │
//! │  ├── rng.rs       - Seeded Xoroshiro128+ PRNG                │
//! │  └── point.rs     - Screen coordinates                       │
//! │                                                              │
//! │  game/            - Game logic (deterministic)               │
//! │  ├── touch.rs     - Touch registration                       │
//! │  ├── selection.rs - Winner selection                         │
//! │  ├── tasks.rs     - Difficulty tiers and task catalog        │
//! │  ├── countdown.rs - Task countdown                           │
//! │  ├── state.rs     - Session phase machine                    │
//! │  └── events.rs    - Game events                              │
//! │                                                              │
//! │  api/             - In-process JSON boundary                 │
//! │  runtime/         - Timers and app context (async)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI layer reports touches, calls the start / complete / play-again
//! actions on a [`SessionRunner`], and redraws from [`SessionView`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod core;
pub mod game;
pub mod runtime;

// Re-export commonly used types
pub use config::{GameConfig, ConfigError};
pub use crate::core::point::Point;
pub use crate::core::rng::DeterministicRng;
pub use game::{
    Difficulty, GameEvent, GameSession, PhaseKind, Player, PlayerId, SessionError,
    SessionView, TouchEvent,
};
pub use runtime::{AppContext, SessionRunner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Most players that can register for one round.
pub const MAX_PLAYERS: usize = 10;

/// Fewest players needed to start a round.
pub const MIN_PLAYERS: usize = 2;

/// Seconds the winner has to complete a task.
pub const TASK_DURATION_SECS: u32 = 30;

/// Pause between starting a round and revealing the winner (ms).
pub const SELECTION_DELAY_MS: u64 = 1000;
