//! Touch Registration
//!
//! Turns touch-start events from the UI layer into players. A finger keeps
//! its touch id for as long as it stays on the screen, so the stream of drag
//! updates it produces registers exactly one player.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::{debug, trace};

use crate::core::point::Point;
use crate::game::player::{Player, PlayerId};
use crate::MAX_PLAYERS;

/// Identifier the UI layer assigns to one finger's contact.
pub type TouchId = u64;

/// A touch-start (or drag-start) event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Finger identifier
    pub touch_id: TouchId,
    /// Screen coordinate of the contact
    pub position: Point,
}

impl TouchEvent {
    /// Create a touch event.
    pub fn new(touch_id: TouchId, x: f64, y: f64) -> Self {
        Self {
            touch_id,
            position: Point::new(x, y),
        }
    }
}

/// Why a touch did not produce a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The player cap is reached.
    CapacityReached,
    /// A round is already under way.
    SessionStarted,
    /// This finger is already registered.
    DuplicateTouch,
}

/// Outcome of a registration attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// A new player was added.
    Registered(PlayerId),
    /// The touch was ignored.
    Rejected(RejectReason),
}

impl Registration {
    /// Did this touch add a player?
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }
}

/// Maps touches to players until the round starts.
#[derive(Clone, Debug)]
pub struct TouchRegistrar {
    max_players: usize,
    touches: BTreeMap<TouchId, PlayerId>,
}

impl TouchRegistrar {
    /// Create a registrar that accepts up to `max_players` touches, never
    /// more than [`MAX_PLAYERS`].
    pub fn new(max_players: usize) -> Self {
        Self {
            max_players: max_players.min(MAX_PLAYERS),
            touches: BTreeMap::new(),
        }
    }

    /// Register a touch, appending a player on success.
    ///
    /// Rejections are silent no-ops for the roster; the returned value only
    /// tells the caller what happened.
    pub fn register(
        &mut self,
        event: &TouchEvent,
        players: &mut Vec<Player>,
        started: bool,
    ) -> Registration {
        if started {
            trace!(touch_id = event.touch_id, "Touch ignored: round in progress");
            return Registration::Rejected(RejectReason::SessionStarted);
        }

        if self.touches.contains_key(&event.touch_id) {
            trace!(touch_id = event.touch_id, "Touch ignored: already registered");
            return Registration::Rejected(RejectReason::DuplicateTouch);
        }

        if self.touches.len() >= self.max_players {
            debug!(touch_id = event.touch_id, max = self.max_players, "Touch ignored: capacity reached");
            return Registration::Rejected(RejectReason::CapacityReached);
        }

        // Ids follow registration order, not roster length.
        let id = PlayerId::new(self.touches.len() as u32);
        players.push(Player::new(id, event.position));
        self.touches.insert(event.touch_id, id);

        debug!("Registered player {} at {}", id, event.position);
        Registration::Registered(id)
    }

    /// Forget every touch.
    pub fn clear(&mut self) {
        self.touches.clear();
    }

    /// Number of registered touches.
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// No touches registered yet?
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Player cap.
    pub fn max_players(&self) -> usize {
        self.max_players
    }
}
