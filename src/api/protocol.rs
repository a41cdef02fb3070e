//! Game API Payloads
//!
//! The two in-process calls the session makes, `InitializeGame` and
//! `GetRandomTask`. Responses travel as JSON with camelCase keys so the UI
//! bridge can consume them unchanged.

use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::core::point::Point;
use crate::core::rng::DeterministicRng;
use crate::game::player::{Player, PlayerId};
use crate::game::tasks::{Difficulty, TaskCatalog};

/// Message sent with every successful initialization.
pub const GAME_STARTED_MESSAGE: &str = "Game started!";

/// Shown in place of a task when the API round-trip fails.
pub const TASK_ERROR_PLACEHOLDER: &str = "Task error";

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Building the response payload failed.
    #[error("Failed to encode response: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The payload could not be parsed back.
    #[error("Failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Player entry in an initialization response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlayer {
    /// Player index.
    pub id: u32,
    /// Touch X coordinate.
    pub position_x: f64,
    /// Touch Y coordinate.
    pub position_y: f64,
    /// Still in the game?
    pub is_active: bool,
}

/// Response to `InitializeGame`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInitializationResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// Fresh roster.
    pub players: Vec<ApiPlayer>,
}

impl GameInitializationResponse {
    /// Build the session roster, keeping the touch position each player
    /// registered with.
    pub fn into_roster(self, registered: &[Player]) -> Vec<Player> {
        self.players
            .into_iter()
            .map(|p| {
                let id = PlayerId::new(p.id);
                let position = registered
                    .iter()
                    .find(|r| r.id == id)
                    .map(|r| r.position)
                    .unwrap_or_else(|| Point::new(p.position_x, p.position_y));
                Player {
                    id,
                    position,
                    active: p.is_active,
                }
            })
            .collect()
    }
}

/// Response to `GetRandomTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// The drawn task.
    pub task_description: String,
}

// =============================================================================
// CALLS
// =============================================================================

/// `InitializeGame`: a roster of `player_count` active players with ids
/// `0..player_count` and zeroed positions, encoded as JSON.
pub fn initialize_game(player_count: usize) -> Result<Vec<u8>, ApiError> {
    let players = (0..player_count as u32)
        .map(|id| ApiPlayer {
            id,
            position_x: 0.0,
            position_y: 0.0,
            is_active: true,
        })
        .collect();

    let response = GameInitializationResponse {
        success: true,
        message: GAME_STARTED_MESSAGE.to_string(),
        players,
    };

    serde_json::to_vec(&response).map_err(ApiError::Encoding)
}

/// Parse an `InitializeGame` payload.
pub fn decode_initialization(data: &[u8]) -> Result<GameInitializationResponse, ApiError> {
    serde_json::from_slice(data).map_err(ApiError::Decoding)
}

/// `GetRandomTask`: one task for the tier, encoded as JSON.
pub fn get_random_task(
    catalog: &TaskCatalog,
    difficulty: Difficulty,
    rng: &mut DeterministicRng,
) -> Result<Vec<u8>, ApiError> {
    let response = TaskResponse {
        success: true,
        task_description: catalog.random_task(difficulty, rng).to_string(),
    };

    serde_json::to_vec(&response).map_err(ApiError::Encoding)
}

/// Parse a `GetRandomTask` payload.
pub fn decode_task(data: &[u8]) -> Result<TaskResponse, ApiError> {
    serde_json::from_slice(data).map_err(ApiError::Decoding)
}

/// Draw a task through the API, degrading to [`TASK_ERROR_PLACEHOLDER`].
pub fn load_task(catalog: &TaskCatalog, difficulty: Difficulty, rng: &mut DeterministicRng) -> String {
    match get_random_task(catalog, difficulty, rng).and_then(|data| decode_task(&data)) {
        Ok(response) if response.success => response.task_description,
        Ok(_) => {
            warn!(%difficulty, "Task request reported failure");
            TASK_ERROR_PLACEHOLDER.to_string()
        }
        Err(e) => {
            warn!(%difficulty, "Task request failed: {}", e);
            TASK_ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// Re-initialize a roster through the API.
///
/// On failure the registered roster is returned unchanged.
pub fn load_roster(registered: &[Player]) -> Vec<Player> {
    match initialize_game(registered.len()).and_then(|data| decode_initialization(&data)) {
        Ok(response) => response.into_roster(registered),
        Err(e) => {
            warn!(players = registered.len(), "Game initialization failed: {}", e);
            registered.to_vec()
        }
    }
}
