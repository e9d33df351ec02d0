//! Integration tests for a full game driven through the scorekeeper.

mod common;

use pok_core::error::DomainError;
use pok_core::player::Player;
use pok_game::domain::rules::{TOKENS_PER_PLAYER, WINNING_SCORE};
use pok_game::domain::state::RoundScores;

#[test]
fn test_full_game_until_winner() {
    // Arrange
    let mut keeper = common::scorekeeper();
    keeper
        .start_game(Player::Blue, Some("Ana".to_owned()), Some("Bo".to_owned()))
        .unwrap();

    // Act: red scores 15-0 in the first round and again in the second.
    common::play_and_score_round(&mut keeper, 10.0, 80.0);
    keeper.start_next_round().unwrap();
    let second_starter = keeper.current_round().unwrap().starting_player_id;
    common::play_and_score_round(&mut keeper, 10.0, 80.0);

    // Assert
    let state = keeper.state();
    assert_eq!(second_starter, Player::Red);
    assert_eq!(state.rounds.len(), 2);
    assert_eq!(state.players.red.total_score, 30);
    assert_eq!(state.players.blue.total_score, 0);
    assert!(keeper.has_winner());
    assert_eq!(keeper.winner(), Some(Player::Red));
    assert!(state.players.red.total_score >= WINNING_SCORE);

    match keeper.start_next_round().unwrap_err() {
        DomainError::Validation(msg) => assert_eq!(msg, "game is over"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_scoring_example_red_three_blue_two() {
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();

    keeper.place_pok(Player::Red, 10.0, 50.0).unwrap();
    keeper.place_pok(Player::Blue, 30.0, 50.0).unwrap();

    assert_eq!(keeper.round_scores(None), Some(RoundScores { red: 3, blue: 2 }));
}

#[test]
fn test_tied_round_scores_nothing_and_alternates_starter() {
    // Arrange
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    common::play_round(&mut keeper, 30.0, 30.0);
    assert!(keeper.current_round().unwrap().is_complete);

    // Act
    keeper.end_round().unwrap();
    keeper.start_next_round().unwrap();

    // Assert
    let state = keeper.state();
    assert_eq!(state.players.red.total_score, 0);
    assert_eq!(state.players.blue.total_score, 0);
    assert_eq!(state.current_round().unwrap().starting_player_id, Player::Blue);
}

#[test]
fn test_turns_alternate_while_scores_are_tied() {
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();

    let mut order = Vec::new();
    for _ in 0..4 {
        let player = keeper.next_player().unwrap();
        order.push(player);
        keeper.place_pok(player, 80.0, 50.0).unwrap();
    }

    assert_eq!(
        order,
        vec![Player::Red, Player::Blue, Player::Red, Player::Blue]
    );
}

#[test]
fn test_trailing_player_keeps_throwing_until_level() {
    // Arrange
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    keeper.place_pok(Player::Red, 10.0, 50.0).unwrap();

    // Act: blue throws into the 1 band three times before catching up.
    keeper.place_pok(Player::Blue, 50.0, 50.0).unwrap();
    keeper.place_pok(Player::Blue, 50.0, 50.0).unwrap();
    let still_blue = keeper.next_player();
    keeper.place_pok(Player::Blue, 50.0, 50.0).unwrap();

    // Assert: 3-3 and blue placed last, so red is up.
    assert_eq!(still_blue, Some(Player::Blue));
    assert_eq!(keeper.round_scores(None), Some(RoundScores { red: 3, blue: 3 }));
    assert_eq!(keeper.next_player(), Some(Player::Red));
    let round = keeper.current_round().unwrap();
    assert_eq!(round.blue_poks_remaining, TOKENS_PER_PLAYER - 3);
}

#[test]
fn test_undo_is_last_in_first_out() {
    // Arrange
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    keeper.place_pok(Player::Red, 80.0, 50.0).unwrap();
    keeper.place_pok(Player::Blue, 80.0, 50.0).unwrap();
    let round = keeper.current_round().unwrap();
    let first = round.poks[0].id.clone();
    let second = round.poks[1].id.clone();

    // Act
    let older = keeper.remove_pok(&first);
    keeper.remove_pok(&second).unwrap();
    keeper.remove_pok(&first).unwrap();

    // Assert
    match older.unwrap_err() {
        DomainError::Validation(msg) => assert!(msg.contains("only the last placed pok")),
        other => panic!("expected Validation, got {other:?}"),
    }
    let round = keeper.current_round().unwrap();
    assert!(round.poks.is_empty());
    assert_eq!(round.last_placed_pok_id, None);
    assert_eq!(keeper.next_player(), Some(Player::Red));
}

#[test]
fn test_flip_rescores_open_round_only() {
    // Arrange: red ends round 0 with one pok in the top circle.
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    keeper.place_pok(Player::Red, 50.0, 19.0).unwrap();
    common::play_round(&mut keeper, 80.0, 80.0);
    let before = keeper.round_scores(Some(0)).unwrap();

    // Act
    keeper.flip_table(true).unwrap();

    // Assert
    assert_eq!(before.red, 4);
    assert_eq!(keeper.round_scores(Some(0)), Some(before));
    keeper.end_round().unwrap();
    keeper.start_next_round().unwrap();
    let starter = keeper.next_player().unwrap();
    keeper.place_pok(starter, 50.0, 19.0).unwrap();
    assert_eq!(keeper.round_scores(None).unwrap().of(starter), 5);
}

#[test]
fn test_move_pok_updates_score() {
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    keeper.place_pok(Player::Red, 80.0, 50.0).unwrap();
    let id = keeper.current_round().unwrap().poks[0].id.clone();

    keeper.move_pok(&id, 50.0, 81.0).unwrap();

    assert_eq!(keeper.round_scores(None).unwrap().red, 5);
}

#[test]
fn test_reset_allows_a_new_game() {
    let mut keeper = common::scorekeeper();
    keeper.start_game(Player::Red, None, None).unwrap();
    common::play_and_score_round(&mut keeper, 10.0, 80.0);

    keeper.reset_game();
    let restarted = keeper.start_game(Player::Blue, None, None).unwrap();

    assert_eq!(restarted.version, 1);
    let state = keeper.state();
    assert_eq!(state.players.red.total_score, 0);
    assert_eq!(state.rounds.len(), 1);
}
