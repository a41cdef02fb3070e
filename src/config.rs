//! Game Configuration
//!
//! Defaults match the shipped game. The demo binary reads overrides from
//! `CHOOSER_*` environment variables.

use std::time::Duration;

use crate::game::tasks::Difficulty;
use crate::{MAX_PLAYERS, MIN_PLAYERS, SELECTION_DELAY_MS, TASK_DURATION_SECS};

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// The settings contradict each other.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Maximum players that can register.
    pub max_players: usize,
    /// Minimum players needed to start.
    pub min_players: usize,
    /// Seconds the winner has for a task.
    pub task_seconds: u32,
    /// Pause between starting and revealing the winner.
    pub selection_delay: Duration,
    /// Countdown tick period.
    pub tick_interval: Duration,
    /// Initial task difficulty.
    pub difficulty: Difficulty,
    /// Initial elimination mode.
    pub elimination_mode: bool,
    /// Fixed RNG seed (random per session when unset).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            min_players: MIN_PLAYERS,
            task_seconds: TASK_DURATION_SECS,
            selection_delay: Duration::from_millis(SELECTION_DELAY_MS),
            tick_interval: Duration::from_secs(1),
            difficulty: Difficulty::Easy,
            elimination_mode: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("CHOOSER_MAX_PLAYERS") {
            config.max_players = parse("CHOOSER_MAX_PLAYERS", &v)?;
        }
        if let Some(v) = lookup("CHOOSER_TASK_SECONDS") {
            config.task_seconds = parse("CHOOSER_TASK_SECONDS", &v)?;
        }
        if let Some(v) = lookup("CHOOSER_SELECTION_DELAY_MS") {
            config.selection_delay = Duration::from_millis(parse("CHOOSER_SELECTION_DELAY_MS", &v)?);
        }
        if let Some(v) = lookup("CHOOSER_DIFFICULTY") {
            config.difficulty = parse("CHOOSER_DIFFICULTY", &v)?;
        }
        if let Some(v) = lookup("CHOOSER_ELIMINATION") {
            config.elimination_mode = v == "true" || v == "1";
        }
        if let Some(v) = lookup("CHOOSER_SEED") {
            config.seed = Some(parse("CHOOSER_SEED", &v)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < MIN_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "min_players must be at least {}", MIN_PLAYERS
            )));
        }
        if self.max_players > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "max_players must be at most {}", MAX_PLAYERS
            )));
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::Invalid(
                "max_players must not be below min_players".to_string(),
            ));
        }
        if self.task_seconds == 0 || self.task_seconds > TASK_DURATION_SECS {
            return Err(ConfigError::Invalid(format!(
                "task_seconds must be in 1..={}", TASK_DURATION_SECS
            )));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_players, 10);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.task_seconds, 30);
        assert_eq!(config.selection_delay, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = GameConfig::from_lookup(lookup(&[
            ("CHOOSER_DIFFICULTY", "hard"),
            ("CHOOSER_ELIMINATION", "1"),
            ("CHOOSER_SEED", "42"),
            ("CHOOSER_TASK_SECONDS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.difficulty, Difficulty::Hard);
        assert!(config.elimination_mode);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.task_seconds, 15);
    }

    #[test]
    fn test_bad_value_rejected() {
        let result = GameConfig::from_lookup(lookup(&[("CHOOSER_MAX_PLAYERS", "lots")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "CHOOSER_MAX_PLAYERS", .. })
        ));
    }

    #[test]
    fn test_task_seconds_bounded() {
        let result = GameConfig::from_lookup(lookup(&[("CHOOSER_TASK_SECONDS", "45")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_max_players_bounded() {
        let result = GameConfig::from_lookup(lookup(&[("CHOOSER_MAX_PLAYERS", "50")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = GameConfig::from_lookup(lookup(&[("CHOOSER_MAX_PLAYERS", "4")])).unwrap();
        assert_eq!(config.max_players, 4);
    }

    #[test]
    fn test_max_below_min_rejected() {
        let config = GameConfig {
            max_players: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
