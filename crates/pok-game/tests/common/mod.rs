//! Shared helpers for game integration tests.
#![allow(dead_code)]

use pok_core::player::Player;
use pok_core::storage::KeyValueStore;
use pok_event_store::FileStore;
use pok_game::application::scorekeeper::Scorekeeper;
use pok_test_support::fixed_clock;

/// An in-memory scorekeeper with a deterministic clock.
pub fn scorekeeper() -> Scorekeeper {
    Scorekeeper::new(Box::new(fixed_clock()))
}

/// A scorekeeper persisting into `store`.
pub fn scorekeeper_with(store: impl KeyValueStore + 'static) -> Scorekeeper {
    Scorekeeper::with_store(Box::new(fixed_clock()), Box::new(store))
}

/// A scorekeeper persisting into a `FileStore` rooted at `dir`.
pub fn file_backed(dir: &std::path::Path) -> Scorekeeper {
    scorekeeper_with(FileStore::new(dir))
}

/// Throws poks in turn order until the current round is complete. Red's
/// poks land at `red_x`, blue's at `blue_x`, all on the vertical midline.
pub fn play_round(keeper: &mut Scorekeeper, red_x: f64, blue_x: f64) {
    while let Some(player) = keeper.next_player() {
        let x = match player {
            Player::Red => red_x,
            Player::Blue => blue_x,
        };
        keeper.place_pok(player, x, 50.0).unwrap();
    }
}

/// Plays and scores one full round.
pub fn play_and_score_round(keeper: &mut Scorekeeper, red_x: f64, blue_x: f64) {
    play_round(keeper, red_x, blue_x);
    keeper.end_round().unwrap();
}
