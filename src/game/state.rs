//! Game Session State
//!
//! The session is an explicit phase machine:
//!
//! ```text
//! Idle ──start──▶ Selecting ──reveal──▶ WinnerAnnounced ──tick──▶ (countdown)
//!   ▲                                         │
//!   └──────────── Resetting ◀── complete / play again
//! ```
//!
//! `Resetting` is transient and never observable between calls; it only
//! appears in the emitted `PhaseChanged` events.

use std::collections::VecDeque;
use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::api;
use crate::config::GameConfig;
use crate::core::rng::DeterministicRng;
use crate::game::countdown::{Countdown, CountdownTick};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::player::{Player, PlayerId};
use crate::game::selection::select_winner;
use crate::game::tasks::{Difficulty, TaskCatalog};
use crate::game::touch::{Registration, TouchEvent, TouchRegistrar};

/// Unique session identifier.
pub type SessionId = [u8; 16];

/// Most undrained events a session holds. Older events are dropped first.
pub const MAX_PENDING_EVENTS: usize = 256;

// =============================================================================
// PHASES
// =============================================================================

/// Winner and task for the current round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// The chosen player
    pub winner: Player,
    /// Task they have to perform
    pub task: String,
    /// Removed from the roster when the countdown ran out
    pub winner_eliminated: bool,
}

/// Session phase.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GamePhase {
    /// Collecting touches.
    #[default]
    Idle,
    /// Round started, winner not drawn yet.
    Selecting,
    /// Winner and task shown, countdown running.
    WinnerAnnounced(Announcement),
}

impl GamePhase {
    /// Field-less tag of this phase.
    pub fn kind(&self) -> PhaseKind {
        match self {
            GamePhase::Idle => PhaseKind::Idle,
            GamePhase::Selecting => PhaseKind::Selecting,
            GamePhase::WinnerAnnounced(_) => PhaseKind::WinnerAnnounced,
        }
    }
}

/// Phase tag used in events and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Collecting touches.
    Idle,
    /// Drawing the winner.
    Selecting,
    /// Task on screen.
    WinnerAnnounced,
    /// Clearing back to idle.
    Resetting,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Selecting => "selecting",
            PhaseKind::WinnerAnnounced => "winner announced",
            PhaseKind::Resetting => "resetting",
        };
        f.write_str(name)
    }
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Too few players to start.
    #[error("Not enough players: {count} registered, {required} required")]
    NotEnoughPlayers {
        /// Registered players.
        count: usize,
        /// Players needed.
        required: usize,
    },

    /// Operation not allowed in the current phase.
    #[error("Invalid phase: expected {expected}, session is {actual}")]
    InvalidPhase {
        /// Phase the operation needs.
        expected: PhaseKind,
        /// Phase the session is in.
        actual: PhaseKind,
    },

    /// Nobody left to choose from.
    #[error("No active players")]
    NoActivePlayers,
}

// =============================================================================
// SESSION VIEW
// =============================================================================

/// Everything the UI needs to draw the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Current phase
    pub phase: PhaseKind,
    /// Registered players
    pub players: Vec<Player>,
    /// Round in progress?
    pub is_started: bool,
    /// Current winner (only while still on the roster)
    pub winner: Option<Player>,
    /// Elimination mode
    pub elimination_mode_enabled: bool,
    /// Task difficulty
    pub difficulty: Difficulty,
    /// Countdown value
    pub seconds_remaining: u32,
    /// Current task, empty when none
    pub task_text: String,
    /// Task screen visible?
    pub is_showing_task: bool,
}

// =============================================================================
// GAME SESSION
// =============================================================================

/// One game session: roster, settings, phase and countdown.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: SessionId,
    min_players: usize,
    catalog: TaskCatalog,
    players: Vec<Player>,
    registrar: TouchRegistrar,
    phase: GamePhase,
    difficulty: Difficulty,
    elimination_mode: bool,
    countdown: Countdown,
    round: u32,
    rng: DeterministicRng,
    events: VecDeque<GameEvent>,
    dropped_events: u64,
}

impl GameSession {
    /// Create an idle session.
    pub fn new(id: SessionId, config: &GameConfig, rng: DeterministicRng) -> Self {
        Self {
            id,
            min_players: config.min_players,
            catalog: TaskCatalog::builtin(),
            players: Vec::new(),
            registrar: TouchRegistrar::new(config.max_players),
            phase: GamePhase::Idle,
            difficulty: config.difficulty,
            elimination_mode: config.elimination_mode,
            countdown: Countdown::new(config.task_seconds),
            round: 0,
            rng,
            events: VecDeque::new(),
            dropped_events: 0,
        }
    }

    /// Use a custom task catalog.
    pub fn with_catalog(mut self, catalog: TaskCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // -------------------------------------------------------------------------
    // Idle operations
    // -------------------------------------------------------------------------

    /// Register a touch. Ignored once started or at capacity.
    pub fn register_touch(&mut self, event: &TouchEvent) -> Registration {
        let started = self.is_started();
        let result = self.registrar.register(event, &mut self.players, started);

        if let Registration::Registered(player_id) = result {
            self.push_event(GameEvent::player_registered(self.round, player_id, event.position));
        }

        result
    }

    /// Choose the task tier for the next round.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.require(PhaseKind::Idle)?;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Toggle elimination mode for the next round.
    pub fn set_elimination_mode(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.require(PhaseKind::Idle)?;
        self.elimination_mode = enabled;
        Ok(())
    }

    /// Can the start action be offered?
    pub fn can_start(&self) -> bool {
        matches!(self.phase, GamePhase::Idle) && self.players.len() >= self.min_players
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// `Idle → Selecting`. Returns the new round number.
    ///
    /// With too few players the session stays idle.
    pub fn start_selection(&mut self) -> Result<u32, SessionError> {
        self.require(PhaseKind::Idle)?;

        if self.players.len() < self.min_players {
            debug!(count = self.players.len(), "Start ignored: not enough players");
            return Err(SessionError::NotEnoughPlayers {
                count: self.players.len(),
                required: self.min_players,
            });
        }

        self.players = api::load_roster(&self.players);
        self.countdown.reset();
        self.round += 1;
        self.set_phase(GamePhase::Selecting);

        info!(round = self.round, players = self.players.len(), "Selection started");
        Ok(self.round)
    }

    /// `Selecting → WinnerAnnounced`. Draws the winner and their task.
    pub fn reveal_winner(&mut self) -> Result<PlayerId, SessionError> {
        self.require(PhaseKind::Selecting)?;

        let winner = *select_winner(&self.players, &mut self.rng)
            .ok_or(SessionError::NoActivePlayers)?;
        self.push_event(GameEvent::winner_selected(self.round, winner.id, winner.position));

        let task = api::load_task(&self.catalog, self.difficulty, &mut self.rng);
        self.push_event(GameEvent::task_assigned(self.round, self.difficulty, task.clone()));

        info!(round = self.round, "Player {} won, task: {}", winner.id, task);

        self.set_phase(GamePhase::WinnerAnnounced(Announcement {
            winner,
            task,
            winner_eliminated: false,
        }));
        Ok(winner.id)
    }

    /// Advance the countdown by one second.
    ///
    /// When it reaches zero with elimination mode on, the winner leaves the
    /// roster. The task screen stays up until the round is reset.
    pub fn tick(&mut self) -> Result<CountdownTick, SessionError> {
        self.require(PhaseKind::WinnerAnnounced)?;

        let result = self.countdown.tick();
        match result {
            CountdownTick::Running(remaining) => {
                self.push_event(GameEvent::countdown_ticked(self.round, remaining));
            }
            CountdownTick::Expired => {
                self.push_event(GameEvent::countdown_ticked(self.round, 0));
                self.push_event(GameEvent::new(self.round, GameEventData::CountdownExpired));
                info!(round = self.round, "Countdown expired");
                if self.elimination_mode {
                    self.eliminate_winner();
                }
            }
            CountdownTick::Stopped => {}
        }

        Ok(result)
    }

    /// The winner finished their task: eliminate them if the mode is on,
    /// then reset.
    pub fn complete_task(&mut self) -> Result<(), SessionError> {
        self.require(PhaseKind::WinnerAnnounced)?;

        if self.elimination_mode {
            self.eliminate_winner();
        }
        self.reset();
        Ok(())
    }

    /// "Play again": unconditional reset.
    pub fn play_again(&mut self) {
        self.reset();
    }

    /// Clear the roster, winner, task and countdown and return to idle.
    ///
    /// Settings (difficulty, elimination mode) and the round counter survive.
    pub fn reset(&mut self) {
        let from = self.phase.kind();
        self.push_event(GameEvent::phase_changed(self.round, from, PhaseKind::Resetting));

        self.players.clear();
        self.registrar.clear();
        self.phase = GamePhase::Idle;
        self.countdown.reset();

        self.push_event(GameEvent::new(self.round, GameEventData::SessionReset));
        self.push_event(GameEvent::phase_changed(self.round, PhaseKind::Resetting, PhaseKind::Idle));
        info!(round = self.round, "Session reset");
    }

    /// Remove a player from the roster while the task screen is up.
    /// Returns whether they were present.
    pub fn eliminate_player(&mut self, player_id: PlayerId) -> Result<bool, SessionError> {
        self.require(PhaseKind::WinnerAnnounced)?;
        Ok(self.remove_player(player_id))
    }

    fn remove_player(&mut self, player_id: PlayerId) -> bool {
        let Some(index) = self.players.iter().position(|p| p.id == player_id) else {
            return false;
        };

        self.players.remove(index);
        self.push_event(GameEvent::player_eliminated(self.round, player_id, self.players.len()));
        info!(round = self.round, remaining = self.players.len(), "Player {} eliminated", player_id);
        true
    }

    fn eliminate_winner(&mut self) {
        let GamePhase::WinnerAnnounced(announcement) = &self.phase else {
            return;
        };
        if announcement.winner_eliminated {
            return;
        }

        let winner_id = announcement.winner.id;
        self.remove_player(winner_id);
        if let GamePhase::WinnerAnnounced(announcement) = &mut self.phase {
            announcement.winner_eliminated = true;
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        let from = self.phase.kind();
        let to = phase.kind();
        self.phase = phase;
        if from != to {
            self.push_event(GameEvent::phase_changed(self.round, from, to));
        }
    }

    fn require(&self, expected: PhaseKind) -> Result<(), SessionError> {
        let actual = self.phase.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase { expected, actual })
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        #[cfg(feature = "debug-tracing")]
        tracing::trace!(?event, "Game event");
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
            self.dropped_events += 1;
            if self.dropped_events == 1 {
                warn!(cap = MAX_PENDING_EVENTS, "Event buffer full, dropping oldest events");
            }
        }
        self.events.push_back(event);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current phase.
    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// Current phase tag.
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Registered players, in registration order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of registered players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Has a round started?
    pub fn is_started(&self) -> bool {
        !matches!(self.phase, GamePhase::Idle)
    }

    /// The winner, while they are still on the roster.
    pub fn winner(&self) -> Option<&Player> {
        match &self.phase {
            GamePhase::WinnerAnnounced(a) if !a.winner_eliminated => Some(&a.winner),
            _ => None,
        }
    }

    /// Current task text, empty outside `WinnerAnnounced`.
    pub fn task_text(&self) -> &str {
        match &self.phase {
            GamePhase::WinnerAnnounced(a) => &a.task,
            _ => "",
        }
    }

    /// Is the task screen up?
    pub fn is_showing_task(&self) -> bool {
        matches!(self.phase, GamePhase::WinnerAnnounced(_))
    }

    /// Countdown value.
    pub fn seconds_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Task difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Elimination mode.
    pub fn elimination_mode(&self) -> bool {
        self.elimination_mode
    }

    /// Take all pending events, oldest first.
    ///
    /// The buffer keeps at most [`MAX_PENDING_EVENTS`]; hosts that never
    /// drain it lose the oldest entries.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Events dropped because the buffer was full.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    /// Snapshot for the UI.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase.kind(),
            players: self.players.clone(),
            is_started: self.is_started(),
            winner: self.winner().copied(),
            elimination_mode_enabled: self.elimination_mode,
            difficulty: self.difficulty,
            seconds_remaining: self.seconds_remaining(),
            task_text: self.task_text().to_string(),
            is_showing_task: self.is_showing_task(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
