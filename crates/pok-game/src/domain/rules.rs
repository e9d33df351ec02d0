//! Game rules: constants, turn order, round starters and the win condition.

use pok_core::player::Player;

use super::state::{GameState, Round};

/// Poks each player throws per round.
pub const TOKENS_PER_PLAYER: usize = 5;

/// Cumulative score that ends the game.
pub const WINNING_SCORE: u32 = 21;

/// Decides who throws next in `round`, or `None` once both hands are empty.
///
/// A player with an empty hand is skipped. While both still hold poks, the
/// player behind on points in this round throws (catch-up rule). On a tie
/// the starter opens an empty round, otherwise turns alternate from the
/// most recent placement.
#[must_use]
pub fn next_player(round: &Round) -> Option<Player> {
    let red_left = round.poks_remaining(Player::Red) > 0;
    let blue_left = round.poks_remaining(Player::Blue) > 0;
    match (red_left, blue_left) {
        (false, false) => None,
        (true, false) => Some(Player::Red),
        (false, true) => Some(Player::Blue),
        (true, true) => {
            let scores = round.scores();
            if let Some(leader) = scores.leader() {
                return Some(leader.opponent());
            }
            Some(match round.poks.last() {
                Some(last) => last.player_id.opponent(),
                None => round.starting_player_id,
            })
        }
    }
}

/// The player who opens the round after `previous`: its winner, or on a tie
/// the opponent of its starter.
#[must_use]
pub fn next_round_starter(previous: &Round) -> Player {
    previous
        .scores()
        .leader()
        .unwrap_or_else(|| previous.starting_player_id.opponent())
}

/// Returns `true` once either cumulative score reaches [`WINNING_SCORE`].
#[must_use]
pub fn has_winner(state: &GameState) -> bool {
    Player::ALL
        .iter()
        .any(|p| state.players.get(*p).total_score >= WINNING_SCORE)
}

/// Returns the player who reached [`WINNING_SCORE`]. If both did, the higher
/// total wins; an exact tie has no single winner.
#[must_use]
pub fn winner(state: &GameState) -> Option<Player> {
    let red = state.players.red.total_score;
    let blue = state.players.blue.total_score;
    match (red >= WINNING_SCORE, blue >= WINNING_SCORE) {
        (true, false) => Some(Player::Red),
        (false, true) => Some(Player::Blue),
        (true, true) if red != blue => Some(if red > blue { Player::Red } else { Player::Blue }),
        _ => None,
    }
}
