//! Event builders stamped with [`crate::FIXED_MILLIS`].
//!
//! Each returns an unappended event (version 0); append it to a log or push
//! it into a `Vec` with [`versioned`] to feed the projection directly.

use pok_core::event::{
    EventKind, GameEvent, GameStarted, PokMoved, PokPlaced, PokRemoved, RoundEnded, RoundStarted,
    TableFlipped,
};
use pok_core::player::Player;

use crate::FIXED_MILLIS;

fn at_fixed_time(kind: EventKind) -> GameEvent {
    GameEvent::new(kind, FIXED_MILLIS)
}

/// `GameStarted` with default names.
#[must_use]
pub fn game_started(starting_player_id: Player) -> GameEvent {
    at_fixed_time(EventKind::GameStarted(GameStarted {
        starting_player_id,
        red_name: None,
        blue_name: None,
    }))
}

/// `GameStarted` with explicit names.
#[must_use]
pub fn game_started_named(starting_player_id: Player, red: &str, blue: &str) -> GameEvent {
    at_fixed_time(EventKind::GameStarted(GameStarted {
        starting_player_id,
        red_name: Some(red.to_owned()),
        blue_name: Some(blue.to_owned()),
    }))
}

/// `PokPlaced`.
#[must_use]
pub fn pok_placed(pok_id: &str, player_id: Player, x: f64, y: f64) -> GameEvent {
    at_fixed_time(EventKind::PokPlaced(PokPlaced {
        pok_id: pok_id.to_owned(),
        player_id,
        x,
        y,
    }))
}

/// `PokMoved`.
#[must_use]
pub fn pok_moved(pok_id: &str, x: f64, y: f64) -> GameEvent {
    at_fixed_time(EventKind::PokMoved(PokMoved {
        pok_id: pok_id.to_owned(),
        x,
        y,
    }))
}

/// `PokRemoved`.
#[must_use]
pub fn pok_removed(pok_id: &str) -> GameEvent {
    at_fixed_time(EventKind::PokRemoved(PokRemoved {
        pok_id: pok_id.to_owned(),
    }))
}

/// `RoundStarted`.
#[must_use]
pub fn round_started(round_number: u32, starting_player_id: Player) -> GameEvent {
    at_fixed_time(EventKind::RoundStarted(RoundStarted {
        round_number,
        starting_player_id,
    }))
}

/// `RoundEnded`.
#[must_use]
pub fn round_ended(round_number: u32) -> GameEvent {
    at_fixed_time(EventKind::RoundEnded(RoundEnded { round_number }))
}

/// `TableFlipped`.
#[must_use]
pub fn table_flipped(is_flipped: bool) -> GameEvent {
    at_fixed_time(EventKind::TableFlipped(TableFlipped { is_flipped }))
}

/// `GameReset`.
#[must_use]
pub fn game_reset() -> GameEvent {
    at_fixed_time(EventKind::GameReset)
}

/// Numbers `events` 1..=n in order, as the event log would.
#[must_use]
pub fn versioned(events: Vec<GameEvent>) -> Vec<GameEvent> {
    events
        .into_iter()
        .zip(1..)
        .map(|(mut event, version)| {
            event.version = version;
            event
        })
        .collect()
}
