//! Player Records
//!
//! One player per registered touch point.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::point::Point;

/// Player identifier, assigned in registration order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create from a raw index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Zero-based registration index.
    pub fn index(self) -> u32 {
        self.0
    }

    /// One-based number shown to people ("Player #1").
    pub fn display_number(self) -> u32 {
        self.0 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.display_number())
    }
}

/// A registered participant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID
    pub id: PlayerId,
    /// Where the finger touched down
    pub position: Point,
    /// Still in the game?
    pub active: bool,
}

impl Player {
    /// Create an active player at a touch position.
    pub fn new(id: PlayerId, position: Point) -> Self {
        Self {
            id,
            position,
            active: true,
        }
    }
}
