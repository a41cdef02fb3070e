//! Game Logic Module
//!
//! Everything that decides the outcome of a round. Synchronous and
//! deterministic for a given RNG seed; timers live in `runtime`.
//!
//! ## Module Structure
//!
//! - `player`: Player records and ids
//! - `touch`: Touch registration
//! - `selection`: Winner selection
//! - `tasks`: Difficulty tiers and the task catalog
//! - `countdown`: Task countdown
//! - `state`: Session phase machine
//! - `events`: Game events for the UI and replay

pub mod player;
pub mod touch;
pub mod selection;
pub mod tasks;
pub mod countdown;
pub mod state;
pub mod events;

// Re-export key types
pub use player::{Player, PlayerId};
pub use touch::{TouchEvent, TouchId, TouchRegistrar, Registration, RejectReason};
pub use selection::select_winner;
pub use tasks::{Difficulty, TaskCatalog, FALLBACK_TASK};
pub use countdown::{Countdown, CountdownTick};
pub use state::{GameSession, GamePhase, PhaseKind, Announcement, SessionError, SessionId, SessionView};
pub use events::{GameEvent, GameEventData};
