//! Pok scorekeeper command-line front end.
//!
//! Each invocation loads the saved game, runs one command through the
//! scorekeeper, and prints JSON to stdout.

pub mod cli;
pub mod config;
pub mod error;

use std::fs;

use pok_core::clock::SystemClock;
use pok_core::error::DomainError;
use pok_event_store::FileStore;
use pok_game::application::scorekeeper::Scorekeeper;
use pok_game::domain::zones::resolve_zone;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::AppError;

/// Runs one command against the game saved under `config.data_dir` and
/// returns the text to print.
///
/// # Errors
///
/// Returns `AppError::Domain` if the command is rejected or the game cannot
/// be loaded or saved, and `AppError::Io` if an export file cannot be used.
/// An unreadable save only blocks commands that build on it; `reset` and
/// `import` replace it.
pub fn run(cli: Cli, config: &Config) -> Result<String, AppError> {
    if let Commands::Zone(args) = &cli.command {
        return Ok(serde_json::to_string_pretty(&resolve_zone(
            args.x,
            args.y,
            args.flipped,
        ))?);
    }

    let store = FileStore::new(&config.data_dir);
    let mut keeper = Scorekeeper::with_store(Box::new(SystemClock), Box::new(store));
    let resumed = match keeper.load() {
        Ok(resumed) => resumed,
        Err(DomainError::Persistence(reason)) if replaces_game(&cli.command) => {
            warn!(%reason, "ignoring unreadable saved game");
            false
        }
        Err(e) => return Err(e.into()),
    };
    info!(resumed, events = keeper.log().len(), data_dir = %config.data_dir.display(), "game loaded");

    let event = match cli.command {
        Commands::Start(args) => Some(keeper.start_game(args.first, args.red, args.blue)?),
        Commands::Place(args) => Some(keeper.place_pok(args.player, args.x, args.y)?),
        Commands::Move(args) => Some(keeper.move_pok(&args.pok_id, args.x, args.y)?),
        Commands::Undo => Some(keeper.undo_last()?),
        Commands::EndRound => Some(keeper.end_round()?),
        Commands::NextRound => Some(keeper.start_next_round()?),
        Commands::Flip(args) => {
            let is_flipped = args.to.unwrap_or(!keeper.state().is_flipped);
            Some(keeper.flip_table(is_flipped)?)
        }
        Commands::Reset => {
            keeper.reset_game();
            None
        }
        Commands::Status(args) if args.full => {
            return Ok(serde_json::to_string_pretty(&keeper.state())?);
        }
        Commands::Status(_) => None,
        Commands::Export(args) => {
            let json = keeper.export_json()?;
            return match args.output {
                Some(path) => {
                    fs::write(&path, &json)?;
                    Ok(format!("exported {} events to {}", keeper.log().len(), path.display()))
                }
                None => Ok(json),
            };
        }
        Commands::Import(args) => {
            let json = fs::read_to_string(&args.file)?;
            keeper.import_json(&json)?;
            None
        }
        Commands::Zone(_) => None,
    };

    if let Some(e) = keeper.last_save_error() {
        return Err(e.clone().into());
    }
    match event {
        Some(event) => Ok(serde_json::to_string_pretty(&event)?),
        None => Ok(serde_json::to_string_pretty(&keeper.scoreboard())?),
    }
}

fn replaces_game(command: &Commands) -> bool {
    matches!(command, Commands::Reset | Commands::Import(_))
}
