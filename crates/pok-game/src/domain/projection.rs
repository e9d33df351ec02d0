//! State projection.
//!
//! `derive_state` is a strict left fold of [`apply`] over the event log.
//! `apply` never fails: events that refer to a missing round or pok, and
//! event types this build does not know, leave the state unchanged. Logs
//! written under looser validation rules therefore always replay.

use pok_core::event::{EventKind, GameEvent, PokMoved, PokPlaced, PokRemoved, RoundEnded};
use pok_core::player::Player;

use super::state::{GameState, Pok, Round};
use super::zones::resolve_zone;

/// Folds `events` into the game state, starting from the initial state.
#[must_use]
pub fn derive_state(events: &[GameEvent]) -> GameState {
    events.iter().fold(GameState::default(), apply)
}

/// Applies one event to `state`.
#[must_use]
pub fn apply(mut state: GameState, event: &GameEvent) -> GameState {
    match &event.kind {
        EventKind::GameStarted(payload) => {
            state.is_started = true;
            state.player_names.red = name_or_default(payload.red_name.as_deref(), Player::Red);
            state.player_names.blue = name_or_default(payload.blue_name.as_deref(), Player::Blue);
            state.rounds = vec![Round::new(0, payload.starting_player_id, state.is_flipped)];
            state.current_round_index = Some(0);
        }
        EventKind::PokPlaced(payload) => place_pok(&mut state, payload),
        EventKind::PokMoved(payload) => move_pok(&mut state, payload),
        EventKind::PokRemoved(payload) => remove_pok(&mut state, payload),
        EventKind::RoundEnded(payload) => end_round(&mut state, payload),
        EventKind::RoundStarted(payload) => {
            let round_number = u32::try_from(state.rounds.len()).unwrap_or(u32::MAX);
            state
                .rounds
                .push(Round::new(round_number, payload.starting_player_id, state.is_flipped));
            state.current_round_index = Some(state.rounds.len() - 1);
        }
        EventKind::TableFlipped(payload) => {
            state.is_flipped = payload.is_flipped;
            if let Some(round) = state.current_round_mut().filter(|r| !r.is_complete) {
                round.is_flipped = payload.is_flipped;
                for pok in &mut round.poks {
                    pok.set_zone(resolve_zone(pok.x, pok.y, payload.is_flipped));
                }
            }
        }
        EventKind::GameReset => return GameState::default(),
        EventKind::Unknown { .. } => {}
    }
    state
}

fn name_or_default(name: Option<&str>, player: Player) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(player.default_name())
        .to_owned()
}

fn place_pok(state: &mut GameState, payload: &PokPlaced) {
    let Some(round) = state.current_round_mut() else {
        return;
    };
    let zone = resolve_zone(payload.x, payload.y, round.is_flipped);
    round.poks.push(Pok::new(
        payload.pok_id.clone(),
        payload.player_id,
        payload.x,
        payload.y,
        zone,
    ));
    round.current_player_id = payload.player_id;
    round.last_placed_pok_id = Some(payload.pok_id.clone());
    round.refresh_counts();
}

fn move_pok(state: &mut GameState, payload: &PokMoved) {
    let Some(round) = state.current_round_mut() else {
        return;
    };
    let is_flipped = round.is_flipped;
    if let Some(pok) = round.pok_mut(&payload.pok_id) {
        pok.x = payload.x;
        pok.y = payload.y;
        pok.set_zone(resolve_zone(payload.x, payload.y, is_flipped));
    }
}

fn remove_pok(state: &mut GameState, payload: &PokRemoved) {
    let Some(round) = state.current_round_mut() else {
        return;
    };
    let Some(index) = round.poks.iter().position(|pok| pok.id == payload.pok_id) else {
        return;
    };
    round.poks.remove(index);
    match round.poks.last() {
        Some(last) => {
            round.last_placed_pok_id = Some(last.id.clone());
            round.current_player_id = last.player_id;
        }
        None => {
            round.last_placed_pok_id = None;
            round.current_player_id = round.starting_player_id;
        }
    }
    round.refresh_counts();
}

fn end_round(state: &mut GameState, payload: &RoundEnded) {
    let Some(round) = state
        .rounds
        .iter_mut()
        .find(|round| round.round_number == payload.round_number)
    else {
        return;
    };
    if round.is_scored {
        return;
    }
    round.is_scored = true;
    let scores = round.scores();
    if let Some(winner) = scores.leader() {
        state.players.get_mut(winner).total_score += scores.difference();
    }
}
