//! Task Catalog
//!
//! Physical tasks the winner has to perform, grouped by difficulty tier.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;

/// Returned when a tier has no tasks.
pub const FALLBACK_TASK: &str = "No task";

const EASY_TASKS: [&str; 3] = [
    "Do 10 squats",
    "Spin around 5 times",
    "Clap your hands 20 times",
];

const MEDIUM_TASKS: [&str; 3] = [
    "Do 15 push-ups",
    "Run in place for 30 seconds",
    "Hop on one leg for 10 seconds",
];

const HARD_TASKS: [&str; 3] = [
    "Do a bridge",
    "Do the splits (or try to)",
    "Do 5 one-handed push-ups",
];

// =============================================================================
// DIFFICULTY
// =============================================================================

/// Task difficulty tier, chosen before the round starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Warm-up tasks
    #[default]
    Easy,
    /// Moderate tasks
    Medium,
    /// Hard tasks
    Hard,
}

impl Difficulty {
    /// All tiers in picker order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Label shown in the tier picker.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognised difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Read-only mapping from tier to task descriptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCatalog {
    tasks: BTreeMap<Difficulty, Vec<String>>,
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaskCatalog {
    /// The catalog shipped with the game (three tasks per tier).
    pub fn builtin() -> Self {
        let mut tasks = BTreeMap::new();
        tasks.insert(Difficulty::Easy, to_owned(&EASY_TASKS));
        tasks.insert(Difficulty::Medium, to_owned(&MEDIUM_TASKS));
        tasks.insert(Difficulty::Hard, to_owned(&HARD_TASKS));
        Self { tasks }
    }

    /// Replace one tier's task list.
    pub fn with_tasks(mut self, difficulty: Difficulty, tasks: Vec<String>) -> Self {
        self.tasks.insert(difficulty, tasks);
        self
    }

    /// Tasks for a tier, in catalog order.
    pub fn tasks(&self, difficulty: Difficulty) -> &[String] {
        self.tasks
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick a task uniformly at random, or [`FALLBACK_TASK`] for an empty tier.
    pub fn random_task(&self, difficulty: Difficulty, rng: &mut DeterministicRng) -> &str {
        rng.choose(self.tasks(difficulty))
            .map(String::as_str)
            .unwrap_or(FALLBACK_TASK)
    }
}

fn to_owned(tasks: &[&str]) -> Vec<String> {
    tasks.iter().map(|t| t.to_string()).collect()
}
