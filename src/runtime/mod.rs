//! Runtime Layer
//!
//! Timers and process-wide ownership. This layer is **non-deterministic**;
//! all game decisions go through `game/`.

pub mod app;
pub mod runner;
pub mod timer;

pub use app::{AppContext, StorageHandle, StorageLocation};
pub use runner::SessionRunner;
pub use timer::TimerGuard;
