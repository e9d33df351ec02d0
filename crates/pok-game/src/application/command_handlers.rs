//! Command handlers for the game context.
//!
//! Each handler derives the current state from the log, validates the
//! command against it, and appends the resulting event. A rejected command
//! appends nothing.

use pok_core::clock::Clock;
use pok_core::command::Command;
use pok_core::error::DomainError;
use pok_core::event::{
    EventKind, GameEvent, GameStarted, PokMoved, PokPlaced, PokRemoved, RoundEnded, RoundStarted,
    TableFlipped,
};
use pok_event_store::EventLog;
use tracing::{info, instrument, warn};

use crate::domain::commands::{
    EndRound, FlipTable, MovePok, PlacePok, RemovePok, ResetGame, StartGame, StartNextRound,
};
use crate::domain::projection::derive_state;
use crate::domain::rules::{has_winner, next_player, next_round_starter};
use crate::domain::state::{GameState, Round};

fn reject(command: &dyn Command, reason: impl Into<String>) -> DomainError {
    let reason = reason.into();
    warn!(command_type = command.command_type(), %reason, "command rejected");
    DomainError::Validation(reason)
}

fn append(kind: EventKind, clock: &dyn Clock, log: &mut EventLog) -> GameEvent {
    log.append(GameEvent::new(kind, clock.now_millis()))
}

fn active_round<'a>(command: &dyn Command, state: &'a GameState) -> Result<&'a Round, DomainError> {
    state
        .current_round()
        .ok_or_else(|| reject(command, "no active round"))
}

fn ensure_finite(command: &dyn Command, x: f64, y: f64) -> Result<(), DomainError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(reject(command, format!("coordinates ({x}, {y}) are not finite")))
    }
}

/// Handles the `StartGame` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a game is already under way.
#[instrument(skip_all, fields(starting_player = %command.starting_player_id))]
pub fn handle_start_game(
    command: &StartGame,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    if state.is_started {
        return Err(reject(command, "game already started"));
    }

    let event = append(
        EventKind::GameStarted(GameStarted {
            starting_player_id: command.starting_player_id,
            red_name: command.red_name.clone(),
            blue_name: command.blue_name.clone(),
        }),
        clock,
        log,
    );
    info!(version = event.version, "game started");
    Ok(event)
}

/// Handles the `PlacePok` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if there is no open round, the
/// coordinates are not finite, the pok id is taken, the player has no poks
/// left, or it is not the player's turn.
#[instrument(skip_all, fields(pok_id = %command.pok_id, player = %command.player_id))]
pub fn handle_place_pok(
    command: &PlacePok,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    let round = active_round(command, &state)?;
    if round.is_complete {
        return Err(reject(
            command,
            format!("round {} is complete", round.round_number),
        ));
    }
    ensure_finite(command, command.x, command.y)?;
    if command.pok_id.is_empty() {
        return Err(reject(command, "pok id must not be empty"));
    }
    if state.rounds.iter().any(|r| r.pok(&command.pok_id).is_some()) {
        return Err(reject(
            command,
            format!("pok '{}' already exists", command.pok_id),
        ));
    }
    if round.poks_remaining(command.player_id) == 0 {
        return Err(reject(
            command,
            format!("{} has no poks remaining", command.player_id),
        ));
    }
    if next_player(round) != Some(command.player_id) {
        return Err(reject(
            command,
            format!("it is not {}'s turn", command.player_id),
        ));
    }

    let event = append(
        EventKind::PokPlaced(PokPlaced {
            pok_id: command.pok_id.clone(),
            player_id: command.player_id,
            x: command.x,
            y: command.y,
        }),
        clock,
        log,
    );
    info!(version = event.version, "pok placed");
    Ok(event)
}

/// Handles the `MovePok` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the pok is not in the current round,
/// the round has been scored, or the coordinates are not finite.
#[instrument(skip_all, fields(pok_id = %command.pok_id))]
pub fn handle_move_pok(
    command: &MovePok,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    let round = active_round(command, &state)?;
    if round.pok(&command.pok_id).is_none() {
        return Err(reject(
            command,
            format!("pok '{}' is not in the current round", command.pok_id),
        ));
    }
    if round.is_scored {
        return Err(reject(
            command,
            format!("round {} has already been scored", round.round_number),
        ));
    }
    ensure_finite(command, command.x, command.y)?;

    let event = append(
        EventKind::PokMoved(PokMoved {
            pok_id: command.pok_id.clone(),
            x: command.x,
            y: command.y,
        }),
        clock,
        log,
    );
    info!(version = event.version, "pok moved");
    Ok(event)
}

/// Handles the `RemovePok` command. Only the most recently placed pok of the
/// current round can be taken back.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the pok is not in the current round,
/// is not the last one placed, or the round has been scored.
#[instrument(skip_all, fields(pok_id = %command.pok_id))]
pub fn handle_remove_pok(
    command: &RemovePok,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    let round = active_round(command, &state)?;
    if round.pok(&command.pok_id).is_none() {
        return Err(reject(
            command,
            format!("pok '{}' is not in the current round", command.pok_id),
        ));
    }
    if round.last_placed_pok_id.as_deref() != Some(command.pok_id.as_str()) {
        return Err(reject(
            command,
            format!("only the last placed pok can be removed, not '{}'", command.pok_id),
        ));
    }
    if round.is_scored {
        return Err(reject(
            command,
            format!("round {} has already been scored", round.round_number),
        ));
    }

    let event = append(
        EventKind::PokRemoved(PokRemoved {
            pok_id: command.pok_id.clone(),
        }),
        clock,
        log,
    );
    info!(version = event.version, "pok removed");
    Ok(event)
}

/// Handles the `EndRound` command: scores the current round.
///
/// # Errors
///
/// Returns `DomainError::Validation` if there is no round, it is not
/// complete, or it has already been scored.
#[instrument(skip_all)]
pub fn handle_end_round(
    command: &EndRound,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    let round = active_round(command, &state)?;
    if !round.is_complete {
        return Err(reject(
            command,
            format!("round {} is not complete", round.round_number),
        ));
    }
    if round.is_scored {
        return Err(reject(
            command,
            format!("round {} has already been scored", round.round_number),
        ));
    }

    let event = append(
        EventKind::RoundEnded(RoundEnded {
            round_number: round.round_number,
        }),
        clock,
        log,
    );
    info!(
        version = event.version,
        round_number = round.round_number,
        "round ended"
    );
    Ok(event)
}

/// Handles the `StartNextRound` command. The starter is the previous round's
/// winner, or on a tie the opponent of its starter.
///
/// # Errors
///
/// Returns `DomainError::Validation` if there is no previous round, it is not
/// complete or not yet scored, or a player has already won the game.
#[instrument(skip_all)]
pub fn handle_start_next_round(
    command: &StartNextRound,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let state = derive_state(log.events());
    let previous = active_round(command, &state)?;
    if !previous.is_complete {
        return Err(reject(
            command,
            format!("round {} is not complete", previous.round_number),
        ));
    }
    if !previous.is_scored {
        return Err(reject(
            command,
            format!("round {} has not been scored", previous.round_number),
        ));
    }
    if has_winner(&state) {
        return Err(reject(command, "game is over"));
    }
    let round_number = u32::try_from(state.rounds.len())
        .map_err(|_| reject(command, "round limit reached"))?;

    let starting_player_id = next_round_starter(previous);
    let event = append(
        EventKind::RoundStarted(RoundStarted {
            round_number,
            starting_player_id,
        }),
        clock,
        log,
    );
    info!(
        version = event.version,
        round_number,
        starting_player = %starting_player_id,
        "round started"
    );
    Ok(event)
}

/// Handles the `FlipTable` command. Always accepted.
///
/// # Errors
///
/// Never fails; the `Result` keeps the handler signatures uniform.
#[instrument(skip_all, fields(is_flipped = command.is_flipped))]
pub fn handle_flip_table(
    command: &FlipTable,
    clock: &dyn Clock,
    log: &mut EventLog,
) -> Result<GameEvent, DomainError> {
    let event = append(
        EventKind::TableFlipped(TableFlipped {
            is_flipped: command.is_flipped,
        }),
        clock,
        log,
    );
    info!(version = event.version, "table flipped");
    Ok(event)
}

/// Handles the `ResetGame` command by clearing the log. No event is stored.
#[instrument(skip_all)]
pub fn handle_reset_game(command: &ResetGame, log: &mut EventLog) {
    let discarded = log.len();
    log.clear();
    info!(command_type = command.command_type(), discarded, "game reset");
}
