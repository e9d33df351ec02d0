//! Configuration read from the environment.

use std::env::VarError;
use std::path::PathBuf;

use crate::error::AppError;

/// Variable naming the directory games are saved in.
pub const DATA_DIR_ENV: &str = "POK_DATA_DIR";

/// Save directory used when [`DATA_DIR_ENV`] is unset.
pub const DEFAULT_DATA_DIR: &str = ".pok";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory of the file-backed store.
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, AppError> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                return Err(AppError::Config(format!("{DATA_DIR_ENV} must be valid UTF-8")));
            }
        };
        Self::from_values(data_dir)
    }

    /// Builds settings from already-read variable values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory is blank.
    pub fn from_values(data_dir: Option<String>) -> Result<Self, AppError> {
        let data_dir = match data_dir {
            Some(dir) if dir.trim().is_empty() => {
                return Err(AppError::Config(format!("{DATA_DIR_ENV} must not be empty")));
            }
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        };
        Ok(Self { data_dir })
    }

    /// Applies a `--data-dir` flag over the environment.
    #[must_use]
    pub fn with_data_dir(self, data_dir: Option<PathBuf>) -> Self {
        match data_dir {
            Some(data_dir) => Self { data_dir },
            None => self,
        }
    }
}
