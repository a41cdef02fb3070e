//! Task Countdown
//!
//! Seconds left for the winner to finish their task. The value never
//! exceeds [`TASK_DURATION_SECS`] and never drops below zero.

use serde::{Serialize, Deserialize};

use crate::TASK_DURATION_SECS;

/// Result of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTick {
    /// Still counting; seconds left after this tick.
    Running(u32),
    /// This tick reached zero.
    Expired,
    /// Already at zero; nothing changed.
    Stopped,
}

/// One-second countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TASK_DURATION_SECS)
    }
}

impl Countdown {
    /// Create a full countdown. Durations above the maximum are clamped.
    pub fn new(duration: u32) -> Self {
        let duration = duration.min(TASK_DURATION_SECS);
        Self {
            duration,
            remaining: duration,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> CountdownTick {
        match self.remaining {
            0 => CountdownTick::Stopped,
            1 => {
                self.remaining = 0;
                CountdownTick::Expired
            }
            n => {
                self.remaining = n - 1;
                CountdownTick::Running(self.remaining)
            }
        }
    }

    /// Refill to the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Full duration in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Has the countdown reached zero?
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
