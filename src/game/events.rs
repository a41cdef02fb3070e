//! Game Events
//!
//! Events recorded by the session for the UI layer and for replay.

use serde::{Serialize, Deserialize};

use crate::core::point::Point;
use crate::game::player::PlayerId;
use crate::game::state::PhaseKind;
use crate::game::tasks::Difficulty;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// A touch became a player
    PlayerRegistered {
        player_id: PlayerId,
        position: Point,
    },

    /// Session phase changed
    PhaseChanged {
        from: PhaseKind,
        to: PhaseKind,
    },

    /// Winner drawn for the round
    WinnerSelected {
        player_id: PlayerId,
        position: Point,
    },

    /// Task assigned to the winner
    TaskAssigned {
        difficulty: Difficulty,
        task: String,
    },

    /// Countdown advanced
    CountdownTicked {
        remaining: u32,
    },

    /// Countdown reached zero
    CountdownExpired,

    /// Player removed from the roster
    PlayerEliminated {
        player_id: PlayerId,
        remaining_players: usize,
    },

    /// Session cleared back to its initial state
    SessionReset,
}

/// A game event tagged with the round it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Round number (0 before the first round starts)
    pub round: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(round: u32, data: GameEventData) -> Self {
        Self { round, data }
    }

    /// Create player registered event.
    pub fn player_registered(round: u32, player_id: PlayerId, position: Point) -> Self {
        Self::new(round, GameEventData::PlayerRegistered { player_id, position })
    }

    /// Create phase changed event.
    pub fn phase_changed(round: u32, from: PhaseKind, to: PhaseKind) -> Self {
        Self::new(round, GameEventData::PhaseChanged { from, to })
    }

    /// Create winner selected event.
    pub fn winner_selected(round: u32, player_id: PlayerId, position: Point) -> Self {
        Self::new(round, GameEventData::WinnerSelected { player_id, position })
    }

    /// Create task assigned event.
    pub fn task_assigned(round: u32, difficulty: Difficulty, task: String) -> Self {
        Self::new(round, GameEventData::TaskAssigned { difficulty, task })
    }

    /// Create countdown ticked event.
    pub fn countdown_ticked(round: u32, remaining: u32) -> Self {
        Self::new(round, GameEventData::CountdownTicked { remaining })
    }

    /// Create player eliminated event.
    pub fn player_eliminated(round: u32, player_id: PlayerId, remaining_players: usize) -> Self {
        Self::new(
            round,
            GameEventData::PlayerEliminated {
                player_id,
                remaining_players,
            },
        )
    }

    /// Player this event is about, if any.
    pub fn player_id(&self) -> Option<PlayerId> {
        match &self.data {
            GameEventData::PlayerRegistered { player_id, .. } => Some(*player_id),
            GameEventData::WinnerSelected { player_id, .. } => Some(*player_id),
            GameEventData::PlayerEliminated { player_id, .. } => Some(*player_id),
            _ => None,
        }
    }

    /// Serialize to JSON for the UI bridge.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
