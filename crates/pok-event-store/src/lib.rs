//! Pok event store.
//!
//! The append-only [`EventLog`] with synchronous publish/subscribe, the
//! persisted blob format, and the key-value backends the blob is written to.

pub mod blob;
pub mod event_log;
pub mod file_store;
pub mod memory_store;

pub use blob::PersistedLog;
pub use event_log::{EventLog, Notification, SubscriptionId, Topic};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Default storage key the event log persists its blob under.
pub const STORAGE_KEY: &str = "pok-event-log";
