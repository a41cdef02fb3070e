//! Game API
//!
//! In-process JSON boundary between the session and the UI bridge.
//! Failures never escape: callers get placeholder text or the unchanged
//! roster, and the error is logged.

pub mod protocol;

pub use protocol::{
    ApiError, ApiPlayer, GameInitializationResponse, TaskResponse,
    initialize_game, get_random_task, decode_initialization, decode_task,
    load_roster, load_task, GAME_STARTED_MESSAGE, TASK_ERROR_PLACEHOLDER,
};
