//! Persisted blob format.
//!
//! The whole log is stored as a single JSON document:
//! `{ "events": [...], "version": n }`.

use pok_core::error::DomainError;
use pok_core::event::GameEvent;
use serde::{Deserialize, Serialize};

/// Serialized form of an [`crate::EventLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLog {
    /// Every stored event, in log order.
    pub events: Vec<GameEvent>,
    /// The log's version counter at save time.
    pub version: u64,
}

impl PersistedLog {
    /// Encodes the blob as JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if encoding fails.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::Persistence(format!("failed to encode event log: {e}")))
    }

    /// Decodes and checks a blob.
    ///
    /// Event versions must run 1, 2, 3, ... without gaps, and the stored
    /// counter must equal the last event's version.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the JSON is unparseable or the
    /// versions are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let blob: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::Persistence(format!("failed to decode event log: {e}")))?;
        blob.check_versions()?;
        Ok(blob)
    }

    fn check_versions(&self) -> Result<(), DomainError> {
        let mut previous = 0;
        for event in &self.events {
            if event.version != previous + 1 {
                return Err(DomainError::Persistence(format!(
                    "event versions are not contiguous: {} follows {previous}",
                    event.version
                )));
            }
            previous = event.version;
        }
        if self.version != previous {
            return Err(DomainError::Persistence(format!(
                "log version {} does not match last event version {previous}",
                self.version
            )));
        }
        Ok(())
    }
}
