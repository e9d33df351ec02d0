//! Pok CLI error types.

use pok_core::error::DomainError;
use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A command was rejected or the saved game could not be used.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading or writing an export file failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be encoded.
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
