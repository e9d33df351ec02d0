//! Query handlers for the game context.
//!
//! Every query derives the state from the log on demand; nothing is cached.

use pok_core::player::Player;
use pok_event_store::EventLog;
use serde::Serialize;

use crate::domain::projection::derive_state;
use crate::domain::rules;
use crate::domain::state::{GameState, Round, RoundScores};

/// Read-only summary of the game for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardView {
    /// A game is under way.
    pub is_started: bool,
    /// Red's display name.
    pub red_name: String,
    /// Blue's display name.
    pub blue_name: String,
    /// Red's cumulative score.
    pub red_total: u32,
    /// Blue's cumulative score.
    pub blue_total: u32,
    /// Number of the round in play.
    pub round_number: Option<u32>,
    /// Points in the round in play.
    pub round_scores: Option<RoundScores>,
    /// Who throws next in the round in play.
    pub next_player: Option<Player>,
    /// The round in play has no poks left to throw.
    pub is_round_complete: bool,
    /// Current table orientation.
    pub is_flipped: bool,
    /// The game winner, once decided.
    pub winner: Option<Player>,
}

/// Returns the full derived state.
#[must_use]
pub fn get_state(log: &EventLog) -> GameState {
    derive_state(log.events())
}

/// Returns the round in play, if any.
#[must_use]
pub fn get_current_round(log: &EventLog) -> Option<Round> {
    let mut state = get_state(log);
    let index = state.current_round_index?;
    (index < state.rounds.len()).then(|| state.rounds.swap_remove(index))
}

/// Returns the scores of round `round_index`, or of the round in play when
/// `None`.
#[must_use]
pub fn get_round_scores(log: &EventLog, round_index: Option<usize>) -> Option<RoundScores> {
    let state = get_state(log);
    let index = round_index.or(state.current_round_index)?;
    state.rounds.get(index).map(Round::scores)
}

/// Returns who throws next, or `None` when no round is open or both hands
/// are empty.
#[must_use]
pub fn get_next_player(log: &EventLog) -> Option<Player> {
    get_state(log).current_round().and_then(rules::next_player)
}

/// Returns `true` once a player has reached the winning score.
#[must_use]
pub fn has_winner(log: &EventLog) -> bool {
    rules::has_winner(&get_state(log))
}

/// Returns the game winner, if decided.
#[must_use]
pub fn get_winner(log: &EventLog) -> Option<Player> {
    rules::winner(&get_state(log))
}

/// Returns the player ahead in `round`, or `None` on a tie.
#[must_use]
pub fn get_round_winner(round: &Round) -> Option<Player> {
    round.scores().leader()
}

/// Returns `true` when both players have placed all their poks in `round`.
#[must_use]
pub fn is_round_complete(round: &Round) -> bool {
    round.is_complete
}

/// Summarizes the game for display.
#[must_use]
pub fn get_scoreboard(log: &EventLog) -> ScoreboardView {
    let state = get_state(log);
    let round = state.current_round();
    ScoreboardView {
        is_started: state.is_started,
        red_name: state.player_names.red.clone(),
        blue_name: state.player_names.blue.clone(),
        red_total: state.players.red.total_score,
        blue_total: state.players.blue.total_score,
        round_number: round.map(|r| r.round_number),
        round_scores: round.map(Round::scores),
        next_player: round.and_then(rules::next_player),
        is_round_complete: round.is_some_and(is_round_complete),
        is_flipped: state.is_flipped,
        winner: rules::winner(&state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pok_test_support::events::{
        game_started, game_started_named, pok_placed, round_ended, round_started,
    };

    fn log_of(events: Vec<pok_core::event::GameEvent>) -> EventLog {
        let mut log = EventLog::new();
        for event in events {
            log.append(event);
        }
        log
    }

    #[test]
    fn test_queries_on_empty_log() {
        let log = EventLog::new();

        assert_eq!(get_state(&log), GameState::default());
        assert!(get_current_round(&log).is_none());
        assert!(get_round_scores(&log, None).is_none());
        assert!(get_next_player(&log).is_none());
        assert!(!has_winner(&log));
        assert!(get_winner(&log).is_none());
    }

    #[test]
    fn test_get_round_scores_sums_current_round() {
        // Arrange
        let log = log_of(vec![
            game_started(Player::Red),
            pok_placed("r1", Player::Red, 10.0, 50.0),
            pok_placed("b1", Player::Blue, 30.0, 50.0),
        ]);

        // Act
        let scores = get_round_scores(&log, None).unwrap();

        // Assert
        assert_eq!(scores, RoundScores { red: 3, blue: 2 });
        assert_eq!(get_next_player(&log), Some(Player::Blue));
    }

    #[test]
    fn test_get_round_scores_by_index() {
        let mut events = vec![game_started(Player::Red)];
        for i in 0..5 {
            events.push(pok_placed(&format!("r{i}"), Player::Red, 10.0, 50.0));
            events.push(pok_placed(&format!("b{i}"), Player::Blue, 80.0, 50.0));
        }
        events.push(round_ended(0));
        events.push(round_started(1, Player::Red));
        let log = log_of(events);

        assert_eq!(
            get_round_scores(&log, Some(0)),
            Some(RoundScores { red: 15, blue: 0 })
        );
        assert_eq!(get_round_scores(&log, None), Some(RoundScores::default()));
        assert_eq!(get_round_scores(&log, Some(7)), None);
        assert_eq!(get_current_round(&log).unwrap().round_number, 1);
    }

    #[test]
    fn test_get_round_winner_and_completion() {
        let mut events = vec![game_started(Player::Red)];
        for i in 0..5 {
            events.push(pok_placed(&format!("r{i}"), Player::Red, 80.0, 50.0));
            events.push(pok_placed(&format!("b{i}"), Player::Blue, 50.0, 50.0));
        }
        let log = log_of(events);

        let round = get_current_round(&log).unwrap();

        assert!(is_round_complete(&round));
        assert_eq!(get_round_winner(&round), Some(Player::Blue));
        assert_eq!(get_next_player(&log), None);
    }

    #[test]
    fn test_get_scoreboard_summarizes_game() {
        // Arrange
        let log = log_of(vec![
            game_started_named(Player::Blue, "Ana", "Bo"),
            pok_placed("b1", Player::Blue, 50.0, 81.0),
        ]);

        // Act
        let view = get_scoreboard(&log);

        // Assert
        assert!(view.is_started);
        assert_eq!(view.red_name, "Ana");
        assert_eq!(view.blue_name, "Bo");
        assert_eq!(view.round_number, Some(0));
        assert_eq!(view.round_scores, Some(RoundScores { red: 0, blue: 5 }));
        assert_eq!(view.next_player, Some(Player::Red));
        assert!(!view.is_round_complete);
        assert_eq!(view.winner, None);
    }
}
