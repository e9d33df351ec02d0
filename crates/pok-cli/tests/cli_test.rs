//! Integration tests driving the `pok` command surface against a temp dir.

use std::path::Path;

use clap::Parser;
use pok_cli::cli::Cli;
use pok_cli::config::Config;
use pok_cli::error::AppError;
use pok_core::error::DomainError;
use serde_json::Value;

fn pok(dir: &Path, args: &[&str]) -> Result<String, AppError> {
    let cli = Cli::try_parse_from(std::iter::once("pok").chain(args.iter().copied())).unwrap();
    let config = Config {
        data_dir: dir.to_path_buf(),
    };
    pok_cli::run(cli, &config)
}

fn json(output: &str) -> Value {
    serde_json::from_str(output).unwrap()
}

#[test]
fn test_game_state_persists_between_invocations() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    pok(dir.path(), &["start", "--first", "blue", "--red", "Ana"]).unwrap();
    let placed = json(&pok(dir.path(), &["place", "blue", "30", "50"]).unwrap());
    let status = json(&pok(dir.path(), &["status"]).unwrap());

    // Assert
    assert_eq!(placed["type"], "PokPlaced");
    assert_eq!(placed["version"], 2);
    assert!(placed["data"]["pokId"].as_str().unwrap().starts_with("pok-"));
    assert_eq!(status["redName"], "Ana");
    assert_eq!(status["roundScores"]["blue"], 2);
    assert_eq!(status["nextPlayer"], "red");
}

#[test]
fn test_rejected_command_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    pok(dir.path(), &["start"]).unwrap();

    let result = pok(dir.path(), &["place", "blue", "10", "50"]);

    match result.unwrap_err() {
        AppError::Domain(DomainError::Validation(msg)) => assert_eq!(msg, "it is not blue's turn"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_undo_and_flip_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    pok(dir.path(), &["start"]).unwrap();
    pok(dir.path(), &["place", "red", "50", "19"]).unwrap();

    let flipped = json(&pok(dir.path(), &["flip"]).unwrap());
    let status = json(&pok(dir.path(), &["status"]).unwrap());
    let undone = json(&pok(dir.path(), &["undo"]).unwrap());

    assert_eq!(flipped["data"]["isFlipped"], true);
    assert_eq!(status["roundScores"]["red"], 5);
    assert_eq!(undone["type"], "PokRemoved");
}

#[test]
fn test_export_then_import_into_fresh_directory() {
    // Arrange
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let file = source.path().join("game.json");
    pok(source.path(), &["start", "--blue", "Bo"]).unwrap();
    pok(source.path(), &["place", "red", "10", "50"]).unwrap();

    // Act
    pok(source.path(), &["export", "--output", file.to_str().unwrap()]).unwrap();
    let imported = json(&pok(target.path(), &["import", file.to_str().unwrap()]).unwrap());

    // Assert
    assert_eq!(imported["blueName"], "Bo");
    assert_eq!(imported["roundScores"]["red"], 3);
    let full = json(&pok(target.path(), &["status", "--full"]).unwrap());
    assert_eq!(full["rounds"][0]["poks"][0]["zoneId"], "3");
}

#[test]
fn test_reset_discards_the_save() {
    let dir = tempfile::tempdir().unwrap();
    pok(dir.path(), &["start"]).unwrap();

    let status = json(&pok(dir.path(), &["reset"]).unwrap());

    assert_eq!(status["isStarted"], false);
    assert!(!dir.path().join("pok-event-log.json").exists());
    assert!(pok(dir.path(), &["start"]).is_ok());
}

#[test]
fn test_zone_lookup_needs_no_game() {
    let dir = tempfile::tempdir().unwrap();

    let zone = json(&pok(dir.path(), &["zone", "19", "50"]).unwrap());

    assert_eq!(zone["zoneId"], "3");
    assert_eq!(zone["points"], 2);
    assert_eq!(zone["isHigh"], false);
    assert_eq!(zone["boundaryZone"], "2");
    assert!(!dir.path().join("pok-event-log.json").exists());
}

#[test]
fn test_corrupt_save_is_reported_until_reset() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("pok-event-log.json");
    std::fs::write(&save, "[]").unwrap();

    // Act
    let status = pok(dir.path(), &["status"]);
    let reset = pok(dir.path(), &["reset"]);

    // Assert
    match status.unwrap_err() {
        AppError::Domain(DomainError::Persistence(msg)) => {
            assert!(msg.starts_with("failed to decode event log"));
        }
        other => panic!("expected Persistence, got {other:?}"),
    }
    assert_eq!(json(&reset.unwrap())["isStarted"], false);
    assert!(!save.exists());
    let started = json(&pok(dir.path(), &["start"]).unwrap());
    assert_eq!(started["version"], 1);
}

#[test]
fn test_import_replaces_corrupt_save() {
    // Arrange
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let file = source.path().join("game.json");
    pok(source.path(), &["start", "--red", "Ana"]).unwrap();
    pok(source.path(), &["export", "--output", file.to_str().unwrap()]).unwrap();
    std::fs::write(target.path().join("pok-event-log.json"), "{broken").unwrap();

    // Act
    let imported = json(&pok(target.path(), &["import", file.to_str().unwrap()]).unwrap());

    // Assert
    assert_eq!(imported["redName"], "Ana");
    let status = json(&pok(target.path(), &["status"]).unwrap());
    assert_eq!(status["isStarted"], true);
}
