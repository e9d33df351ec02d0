//! The scorekeeper facade.
//!
//! Bundles one event log with its clock and optional storage so a caller can
//! drive a whole game without wiring the handlers by hand. Each instance is
//! independent; nothing is global.

use std::fmt;

use pok_core::clock::Clock;
use pok_core::error::DomainError;
use pok_core::event::GameEvent;
use pok_core::player::Player;
use pok_core::storage::KeyValueStore;
use pok_event_store::{EventLog, PersistedLog};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::{command_handlers, query_handlers};
use crate::domain::commands::{
    EndRound, FlipTable, MovePok, PlacePok, RemovePok, ResetGame, StartGame, StartNextRound,
};
use crate::domain::state::{GameState, Round, RoundScores};

/// One game: its event log, clock and optional persistence.
///
/// After every accepted command the log is written to the store. A failed
/// write is logged and kept in [`Scorekeeper::last_save_error`]; the command
/// itself still stands.
pub struct Scorekeeper {
    log: EventLog,
    clock: Box<dyn Clock>,
    store: Option<Box<dyn KeyValueStore>>,
    last_save_error: Option<DomainError>,
}

impl fmt::Debug for Scorekeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorekeeper")
            .field("log", &self.log)
            .field("persistent", &self.store.is_some())
            .field("last_save_error", &self.last_save_error)
            .finish_non_exhaustive()
    }
}

impl Scorekeeper {
    /// Creates an in-memory scorekeeper with no persistence.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            log: EventLog::new(),
            clock,
            store: None,
            last_save_error: None,
        }
    }

    /// Creates a scorekeeper that persists into `store`. Call
    /// [`Scorekeeper::load`] to resume a saved game.
    #[must_use]
    pub fn with_store(clock: Box<dyn Clock>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new(clock)
        }
    }

    /// The underlying event log.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Mutable access to the log, for subscribing to notifications.
    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// The persistence medium, if any.
    #[must_use]
    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    /// The error from the most recent failed write, cleared by the next
    /// successful one.
    #[must_use]
    pub fn last_save_error(&self) -> Option<&DomainError> {
        self.last_save_error.as_ref()
    }

    /// Replaces the log with the saved game. Returns `false` when there is no
    /// store or nothing saved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the saved blob cannot be read or
    /// decoded; the log is left empty.
    pub fn load(&mut self) -> Result<bool, DomainError> {
        match &self.store {
            Some(store) => self.log.load(store.as_ref()),
            None => Ok(false),
        }
    }

    /// Writes the log to the store. A no-op without a store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the write fails.
    pub fn save(&mut self) -> Result<(), DomainError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let result = self.log.save(store.as_ref());
        self.last_save_error = result.as_ref().err().cloned();
        result
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist event log; game continues in memory");
        }
    }

    fn run<F>(&mut self, handler: F) -> Result<GameEvent, DomainError>
    where
        F: FnOnce(&dyn Clock, &mut EventLog) -> Result<GameEvent, DomainError>,
    {
        let event = handler(self.clock.as_ref(), &mut self.log)?;
        self.persist();
        Ok(event)
    }

    /// Starts a game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a game is already under way.
    pub fn start_game(
        &mut self,
        starting_player_id: Player,
        red_name: Option<String>,
        blue_name: Option<String>,
    ) -> Result<GameEvent, DomainError> {
        let command = StartGame {
            starting_player_id,
            red_name,
            blue_name,
        };
        self.run(|clock, log| command_handlers::handle_start_game(&command, clock, log))
    }

    /// Places a new pok for `player_id`, generating its id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the placement is not allowed.
    pub fn place_pok(&mut self, player_id: Player, x: f64, y: f64) -> Result<GameEvent, DomainError> {
        let command = PlacePok {
            pok_id: format!("pok-{}", Uuid::new_v4()),
            player_id,
            x,
            y,
        };
        self.run(|clock, log| command_handlers::handle_place_pok(&command, clock, log))
    }

    /// Moves a placed pok.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the move is not allowed.
    pub fn move_pok(&mut self, pok_id: &str, x: f64, y: f64) -> Result<GameEvent, DomainError> {
        let command = MovePok {
            pok_id: pok_id.to_owned(),
            x,
            y,
        };
        self.run(|clock, log| command_handlers::handle_move_pok(&command, clock, log))
    }

    /// Removes a pok; only the most recently placed one is accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `pok_id` is not the last placed.
    pub fn remove_pok(&mut self, pok_id: &str) -> Result<GameEvent, DomainError> {
        let command = RemovePok {
            pok_id: pok_id.to_owned(),
        };
        self.run(|clock, log| command_handlers::handle_remove_pok(&command, clock, log))
    }

    /// Takes back the most recently placed pok of the current round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if nothing can be undone.
    pub fn undo_last(&mut self) -> Result<GameEvent, DomainError> {
        let last = self
            .current_round()
            .and_then(|round| round.last_placed_pok_id)
            .ok_or_else(|| DomainError::Validation("nothing to undo".to_owned()))?;
        self.remove_pok(&last)
    }

    /// Scores the current round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the round is not complete or was
    /// already scored.
    pub fn end_round(&mut self) -> Result<GameEvent, DomainError> {
        self.run(|clock, log| command_handlers::handle_end_round(&EndRound, clock, log))
    }

    /// Opens the next round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the previous round is not
    /// complete or the game is over.
    pub fn start_next_round(&mut self) -> Result<GameEvent, DomainError> {
        self.run(|clock, log| command_handlers::handle_start_next_round(&StartNextRound, clock, log))
    }

    /// Sets the table orientation.
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub fn flip_table(&mut self, is_flipped: bool) -> Result<GameEvent, DomainError> {
        let command = FlipTable { is_flipped };
        self.run(|clock, log| command_handlers::handle_flip_table(&command, clock, log))
    }

    /// Discards the game and deletes the saved copy.
    pub fn reset_game(&mut self) {
        command_handlers::handle_reset_game(&ResetGame, &mut self.log);
        let Some(store) = &self.store else {
            return;
        };
        match store.remove(self.log.storage_key()) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!(error = %e, "failed to delete saved game");
                self.last_save_error = Some(e);
            }
        }
    }

    /// Encodes the log as the persisted blob JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if encoding fails.
    pub fn export_json(&self) -> Result<String, DomainError> {
        self.log.export_json()
    }

    /// Replaces the game with an exported blob and persists it. Returns the
    /// number of events imported.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the blob is invalid. The current
    /// game and its saved copy are left untouched in that case.
    pub fn import_json(&mut self, json: &str) -> Result<usize, DomainError> {
        PersistedLog::from_json(json).inspect_err(|e| {
            warn!(error = %e, "rejected game import");
        })?;
        let count = self.log.import_json(json)?;
        info!(events = count, "game imported");
        self.persist();
        Ok(count)
    }

    /// The full derived state.
    #[must_use]
    pub fn state(&self) -> GameState {
        query_handlers::get_state(&self.log)
    }

    /// The round in play.
    #[must_use]
    pub fn current_round(&self) -> Option<Round> {
        query_handlers::get_current_round(&self.log)
    }

    /// Scores of `round_index`, or of the round in play.
    #[must_use]
    pub fn round_scores(&self, round_index: Option<usize>) -> Option<RoundScores> {
        query_handlers::get_round_scores(&self.log, round_index)
    }

    /// Who throws next.
    #[must_use]
    pub fn next_player(&self) -> Option<Player> {
        query_handlers::get_next_player(&self.log)
    }

    /// Whether a player has reached the winning score.
    #[must_use]
    pub fn has_winner(&self) -> bool {
        query_handlers::has_winner(&self.log)
    }

    /// The game winner, if decided.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        query_handlers::get_winner(&self.log)
    }

    /// Display summary.
    #[must_use]
    pub fn scoreboard(&self) -> query_handlers::ScoreboardView {
        query_handlers::get_scoreboard(&self.log)
    }
}
