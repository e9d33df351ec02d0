//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use pok_core::error::DomainError;
use pok_core::storage::KeyValueStore;

/// A volatile store backed by a map. Useful for tests and for embedding the
/// engine where persistence is handled by the host.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> DomainError {
    DomainError::Persistence(format!("memory store mutex poisoned: {e}"))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .lock()
            .map_err(poisoned)?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}
