//! Key-value storage abstraction.

use crate::error::DomainError;

/// Synchronous key-value medium the event log persists its blob into.
///
/// Implementations report an unavailable medium as
/// `DomainError::Persistence`; callers treat that as non-fatal.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deletes the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
