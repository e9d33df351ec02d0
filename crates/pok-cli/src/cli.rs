//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pok_core::player::Player;

/// Keep score of a game of Pok. The game is saved after every command.
#[derive(Parser, Debug)]
#[command(name = "pok", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Directory the game is saved in (overrides `POK_DATA_DIR`).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new game.
    Start(StartArgs),

    /// Throw a pok for a player.
    Place(PlaceArgs),

    /// Drag a placed pok to a new position.
    Move(MoveArgs),

    /// Take back the last pok thrown this round.
    Undo,

    /// Score the current round.
    EndRound,

    /// Open the next round.
    NextRound,

    /// Turn the table around, or set its orientation.
    Flip(FlipArgs),

    /// Discard the game and its save.
    Reset,

    /// Print the scoreboard.
    Status(StatusArgs),

    /// Write the saved game as JSON.
    Export(ExportArgs),

    /// Replace the game with an exported JSON file.
    Import(ImportArgs),

    /// Show where a position scores, without touching the game.
    Zone(ZoneArgs),
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Player who throws first (red or blue).
    #[arg(long, default_value = "red")]
    pub first: Player,

    /// Display name for red.
    #[arg(long)]
    pub red: Option<String>,

    /// Display name for blue.
    #[arg(long)]
    pub blue: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlaceArgs {
    /// Player throwing (red or blue).
    pub player: Player,

    /// Horizontal position in percent of table width.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Vertical position in percent of table height.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Id of the pok to move.
    pub pok_id: String,

    /// New horizontal position in percent.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// New vertical position in percent.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
}

#[derive(Args, Debug)]
pub struct FlipArgs {
    /// Orientation to set; toggles when omitted.
    #[arg(long, value_name = "BOOL")]
    pub to: Option<bool>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the full derived state instead of the scoreboard.
    #[arg(long)]
    pub full: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// File to write; prints to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Exported game file.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ZoneArgs {
    /// Horizontal position in percent.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Vertical position in percent.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Resolve against the flipped table.
    #[arg(long)]
    pub flipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_place_with_negative_coordinate() {
        let cli = Cli::try_parse_from(["pok", "place", "blue", "-3", "50"]).unwrap();

        match cli.command {
            Commands::Place(args) => {
                assert_eq!(args.player, Player::Blue);
                assert!((args.x + 3.0).abs() < f64::EPSILON);
            }
            other => panic!("expected Place, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_player() {
        let result = Cli::try_parse_from(["pok", "place", "green", "10", "50"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_start_defaults_to_red() {
        let cli = Cli::try_parse_from(["pok", "--data-dir", "saves", "start"]).unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("saves")));
        match cli.command {
            Commands::Start(args) => assert_eq!(args.first, Player::Red),
            other => panic!("expected Start, got {other:?}"),
        }
    }
}
