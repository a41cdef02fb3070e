//! Application Context
//!
//! The one place that owns process-wide resources: configuration and the
//! optional storage handle. Components get what they need from here
//! explicitly; there is no global lookup.

use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;

use crate::config::GameConfig;
use crate::core::rng::DeterministicRng;
use crate::game::state::{GameSession, SessionId};
use crate::runtime::runner::SessionRunner;

/// Where durable data would be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// Nothing survives the process.
    InMemory,
    /// A store file on disk.
    File(PathBuf),
}

/// Handle to the storage container.
///
/// Gameplay does not read or write through it; it exists so later features
/// have a single owner to ask.
#[derive(Debug)]
pub struct StorageHandle {
    location: StorageLocation,
}

impl StorageHandle {
    /// Where this store lives.
    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Is the store purely in memory?
    pub fn is_in_memory(&self) -> bool {
        self.location == StorageLocation::InMemory
    }
}

/// Process-wide context.
#[derive(Debug)]
pub struct AppContext {
    config: GameConfig,
    storage_location: Option<StorageLocation>,
    storage: OnceLock<StorageHandle>,
}

impl AppContext {
    /// Create a context without storage.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            storage_location: None,
            storage: OnceLock::new(),
        }
    }

    /// Enable storage at the given location (opened on first use).
    pub fn with_storage(mut self, location: StorageLocation) -> Self {
        self.storage_location = Some(location);
        self
    }

    /// Game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The storage handle, opened lazily. `None` when storage is disabled.
    pub fn storage(&self) -> Option<&StorageHandle> {
        let location = self.storage_location.as_ref()?;
        Some(self.storage.get_or_init(|| {
            info!(?location, "Storage handle opened");
            StorageHandle {
                location: location.clone(),
            }
        }))
    }

    /// Has the storage handle been opened yet?
    pub fn storage_opened(&self) -> bool {
        self.storage.get().is_some()
    }

    /// Create a fresh idle session.
    ///
    /// Uses the configured seed when set, otherwise derives one from the
    /// session id and a random nonce.
    pub fn new_session(&self) -> GameSession {
        let id: SessionId = uuid::Uuid::new_v4().into_bytes();
        let rng = match self.config.seed {
            Some(seed) => DeterministicRng::new(seed),
            None => DeterministicRng::for_session(&id, rand::random::<u64>()),
        };

        info!("Session {} created", hex::encode(&id[..4]));
        GameSession::new(id, &self.config, rng)
    }

    /// Create a session together with its runner.
    pub fn new_runner(&self) -> SessionRunner {
        SessionRunner::new(self.new_session(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::touch::TouchEvent;

    #[test]
    fn test_storage_disabled_by_default() {
        let app = AppContext::new(GameConfig::default());
        assert!(app.storage().is_none());
        assert!(!app.storage_opened());
    }

    #[test]
    fn test_storage_opened_lazily_once() {
        let app = AppContext::new(GameConfig::default()).with_storage(StorageLocation::InMemory);
        assert!(!app.storage_opened());

        let first = app.storage().unwrap() as *const StorageHandle;
        let second = app.storage().unwrap() as *const StorageHandle;
        assert!(app.storage_opened());
        assert_eq!(first, second);
        assert!(app.storage().unwrap().is_in_memory());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let app = AppContext::new(GameConfig::default());
        assert_ne!(app.new_session().id(), app.new_session().id());
    }

    #[test]
    fn test_unseeded_nonce_varies() {
        let id = [7u8; 16];
        let a = DeterministicRng::for_session(&id, rand::random::<u64>());
        let b = DeterministicRng::for_session(&id, rand::random::<u64>());
        assert_ne!(a.state(), b.state());
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let config = GameConfig {
            seed: Some(99),
            ..Default::default()
        };
        let app = AppContext::new(config);
        let mut a = app.new_session();
        let mut b = app.new_session();

        for session in [&mut a, &mut b] {
            for i in 0..6 {
                session.register_touch(&TouchEvent::new(i, i as f64, 0.0));
            }
            session.start_selection().unwrap();
        }

        assert_eq!(a.reveal_winner(), b.reveal_winner());
        assert_eq!(a.task_text(), b.task_text());
    }

    #[test]
    fn test_session_uses_config() {
        let config = GameConfig {
            elimination_mode: true,
            task_seconds: 10,
            ..Default::default()
        };
        let session = AppContext::new(config).new_session();
        assert!(session.elimination_mode());
        assert_eq!(session.seconds_remaining(), 10);
    }
}
