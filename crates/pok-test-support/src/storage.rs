//! Fake `KeyValueStore` implementations for tests.

use pok_core::error::DomainError;
use pok_core::storage::KeyValueStore;

/// A store whose medium is always unavailable. Useful for testing that
/// persistence failures are reported but non-fatal.
#[derive(Debug)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Persistence("storage unavailable".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Persistence("storage unavailable".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Persistence("storage unavailable".into()))
    }
}

/// A read-only store that returns the same blob for every key and silently
/// drops writes. Used to feed hand-written or corrupt blobs to `load`.
#[derive(Debug)]
pub struct StaticStore {
    blob: String,
}

impl StaticStore {
    /// Creates a store that always returns `blob`.
    #[must_use]
    pub fn new(blob: impl Into<String>) -> Self {
        Self { blob: blob.into() }
    }
}

impl KeyValueStore for StaticStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Ok(Some(self.blob.clone()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Ok(())
    }
}
