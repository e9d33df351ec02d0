//! Commands for the game context.

use pok_core::command::Command;
use pok_core::player::Player;

/// Command to start a new game.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The player who throws first in round 0.
    pub starting_player_id: Player,
    /// Optional display name for red.
    pub red_name: Option<String>,
    /// Optional display name for blue.
    pub blue_name: Option<String>,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start_game"
    }
}

/// Command to place a pok on the table.
#[derive(Debug, Clone)]
pub struct PlacePok {
    /// Identifier for the new pok.
    pub pok_id: String,
    /// The player throwing.
    pub player_id: Player,
    /// Horizontal position in percent.
    pub x: f64,
    /// Vertical position in percent.
    pub y: f64,
}

impl Command for PlacePok {
    fn command_type(&self) -> &'static str {
        "game.place_pok"
    }
}

/// Command to drag a placed pok to a new position.
#[derive(Debug, Clone)]
pub struct MovePok {
    /// The pok to move.
    pub pok_id: String,
    /// New horizontal position in percent.
    pub x: f64,
    /// New vertical position in percent.
    pub y: f64,
}

impl Command for MovePok {
    fn command_type(&self) -> &'static str {
        "game.move_pok"
    }
}

/// Command to take back the most recently placed pok.
#[derive(Debug, Clone)]
pub struct RemovePok {
    /// The pok to remove.
    pub pok_id: String,
}

impl Command for RemovePok {
    fn command_type(&self) -> &'static str {
        "game.remove_pok"
    }
}

/// Command to score the current round.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndRound;

impl Command for EndRound {
    fn command_type(&self) -> &'static str {
        "game.end_round"
    }
}

/// Command to open the next round.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartNextRound;

impl Command for StartNextRound {
    fn command_type(&self) -> &'static str {
        "game.start_next_round"
    }
}

/// Command to set the table orientation.
#[derive(Debug, Clone, Copy)]
pub struct FlipTable {
    /// The new orientation.
    pub is_flipped: bool,
}

impl Command for FlipTable {
    fn command_type(&self) -> &'static str {
        "game.flip_table"
    }
}

/// Command to discard the whole game.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetGame;

impl Command for ResetGame {
    fn command_type(&self) -> &'static str {
        "game.reset_game"
    }
}
