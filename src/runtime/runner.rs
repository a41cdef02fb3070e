//! Session Runner
//!
//! Drives one [`GameSession`] in real time: the pause before the winner is
//! revealed and the 1 Hz countdown. Both run in a single spawned task that
//! is aborted on every exit transition and when the runner is dropped.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::game::countdown::CountdownTick;
use crate::game::events::GameEvent;
use crate::game::state::{GameSession, PhaseKind, SessionError, SessionView};
use crate::game::tasks::Difficulty;
use crate::game::touch::{Registration, TouchEvent};
use crate::runtime::timer::TimerGuard;

/// Owns a session and its round timer.
pub struct SessionRunner {
    session: Arc<RwLock<GameSession>>,
    timer: TimerGuard,
    selection_delay: Duration,
    tick_interval: Duration,
}

impl SessionRunner {
    /// Wrap a session.
    pub fn new(session: GameSession, config: &GameConfig) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            timer: TimerGuard::default(),
            selection_delay: config.selection_delay,
            tick_interval: config.tick_interval,
        }
    }

    /// Shared handle to the session.
    pub fn session(&self) -> Arc<RwLock<GameSession>> {
        self.session.clone()
    }

    /// Forward a touch to the registrar.
    pub async fn register_touch(&self, event: TouchEvent) -> Registration {
        self.session.write().await.register_touch(&event)
    }

    /// Set the difficulty for the next round.
    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.session.write().await.set_difficulty(difficulty)
    }

    /// Set elimination mode for the next round.
    pub async fn set_elimination_mode(&self, enabled: bool) -> Result<(), SessionError> {
        self.session.write().await.set_elimination_mode(enabled)
    }

    /// Start a round and schedule the reveal and countdown.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<u32, SessionError> {
        let round = self.session.write().await.start_selection()?;

        self.timer.cancel();
        let handle = tokio::spawn(run_round(
            self.session.clone(),
            round,
            self.selection_delay,
            self.tick_interval,
        ));
        self.timer = TimerGuard::new(handle);

        Ok(round)
    }

    /// The winner finished the task.
    #[instrument(skip(self))]
    pub async fn complete_task(&mut self) -> Result<(), SessionError> {
        let mut session = self.session.write().await;
        session.complete_task()?;
        self.timer.cancel();
        Ok(())
    }

    /// Reset to an empty idle session.
    #[instrument(skip(self))]
    pub async fn play_again(&mut self) {
        self.timer.cancel();
        self.session.write().await.play_again();
    }

    /// Stop the timer without touching the session (view torn down).
    pub fn shutdown(&mut self) {
        if self.timer.cancel() {
            debug!("Round timer cancelled on shutdown");
        }
    }

    /// Is a reveal or countdown pending?
    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// Snapshot for the UI.
    pub async fn view(&self) -> SessionView {
        self.session.read().await.view()
    }

    /// Take all pending events.
    pub async fn take_events(&self) -> Vec<GameEvent> {
        self.session.write().await.take_events()
    }
}

/// Reveal after `delay`, then tick once per `period` until the countdown
/// ends or the round is left.
async fn run_round(
    session: Arc<RwLock<GameSession>>,
    round: u32,
    delay: Duration,
    period: Duration,
) {
    sleep(delay).await;

    {
        let mut s = session.write().await;
        if s.round() != round || s.phase_kind() != PhaseKind::Selecting {
            return;
        }
        if let Err(e) = s.reveal_winner() {
            warn!(round, "Reveal failed: {}", e);
            return;
        }
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let mut s = session.write().await;
        if s.round() != round {
            break;
        }

        match s.tick() {
            Ok(CountdownTick::Running(_)) => {}
            Ok(CountdownTick::Expired) | Ok(CountdownTick::Stopped) => {
                info!(round, "Countdown finished");
                break;
            }
            Err(e) => {
                debug!(round, "Countdown stopped: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use crate::game::events::GameEventData;
    use crate::game::tasks::TaskCatalog;

    fn create_test_runner(config: GameConfig) -> SessionRunner {
        let session = GameSession::new([1; 16], &config, DeterministicRng::new(7));
        SessionRunner::new(session, &config)
    }

    async fn register(runner: &SessionRunner, n: u64) {
        for i in 0..n {
            runner
                .register_touch(TouchEvent::new(i, 100.0 * (i + 1) as f64, 50.0))
                .await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_needs_two_players() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 1).await;

        let result = runner.start().await;
        assert!(matches!(result, Err(SessionError::NotEnoughPlayers { .. })));
        assert!(!runner.timer_active());
        assert_eq!(runner.view().await.phase, PhaseKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_winner_revealed_after_delay() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 3).await;
        runner.start().await.unwrap();

        let view = runner.view().await;
        assert_eq!(view.phase, PhaseKind::Selecting);
        assert!(view.winner.is_none());

        sleep(Duration::from_millis(1500)).await;

        let view = runner.view().await;
        assert_eq!(view.phase, PhaseKind::WinnerAnnounced);
        assert!(view.winner.is_some());
        assert_eq!(view.seconds_remaining, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_each_second() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 2).await;
        runner.start().await.unwrap();

        // Reveal at 1s, ticks at 2s..=11s.
        sleep(Duration::from_millis(11_500)).await;
        assert_eq!(runner.view().await.seconds_remaining, 20);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(runner.view().await.seconds_remaining, 0);
        assert!(!runner.timer_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_elimination() {
        let mut runner = create_test_runner(GameConfig {
            elimination_mode: true,
            ..Default::default()
        });
        register(&runner, 3).await;
        runner.start().await.unwrap();

        sleep(Duration::from_millis(1500)).await;
        let winner = runner.view().await.winner.unwrap();

        sleep(Duration::from_secs(31)).await;
        let view = runner.view().await;
        assert_eq!(view.players.len(), 2);
        assert!(!view.players.iter().any(|p| p.id == winner.id));
        assert_eq!(view.seconds_remaining, 0);
        assert!(view.is_showing_task);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_reset() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 2).await;
        runner.start().await.unwrap();

        sleep(Duration::from_millis(5500)).await;
        assert_eq!(runner.view().await.seconds_remaining, 26);

        runner.play_again().await;
        assert!(!runner.timer_active());
        runner.take_events().await;

        sleep(Duration::from_secs(10)).await;
        let view = runner.view().await;
        assert_eq!(view.seconds_remaining, 30);
        assert!(runner.take_events().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_selection_cancels_reveal() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 2).await;
        runner.start().await.unwrap();

        runner.play_again().await;
        sleep(Duration::from_secs(3)).await;

        let view = runner.view().await;
        assert_eq!(view.phase, PhaseKind::Idle);
        assert!(view.winner.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_task_stops_timer() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 2).await;
        runner.start().await.unwrap();

        assert!(runner.complete_task().await.is_err());

        sleep(Duration::from_millis(2500)).await;
        runner.complete_task().await.unwrap();
        assert!(!runner.timer_active());
        assert_eq!(runner.view().await.phase, PhaseKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_timer() {
        let mut runner = create_test_runner(GameConfig::default());
        register(&runner, 2).await;
        runner.start().await.unwrap();

        runner.shutdown();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(runner.view().await.phase, PhaseKind::Selecting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_round() {
        let mut runner = create_test_runner(GameConfig::default());
        let touches = [
            TouchEvent::new(11, 40.0, 80.0),
            TouchEvent::new(12, 160.0, 220.0),
            TouchEvent::new(13, 300.0, 90.0),
        ];
        for touch in touches {
            assert!(runner.register_touch(touch).await.is_registered());
        }

        runner.start().await.unwrap();
        sleep(Duration::from_millis(1200)).await;

        let view = runner.view().await;
        let winner = view.winner.unwrap();
        assert!(touches.iter().any(|t| t.position == winner.position));
        assert!(!view.task_text.is_empty());
        assert!(TaskCatalog::builtin()
            .tasks(Difficulty::Easy)
            .contains(&view.task_text));

        runner.play_again().await;
        let view = runner.view().await;
        assert!(view.players.is_empty());
        assert!(!view.is_started);
        assert!(view.winner.is_none());
        assert_eq!(view.seconds_remaining, 30);
        assert_eq!(view.phase, PhaseKind::Idle);

        let events = runner.take_events().await;
        assert!(events.iter().any(|e| matches!(e.data, GameEventData::WinnerSelected { .. })));
        assert_eq!(events.last().map(|e| e.round), Some(1));
    }
}
