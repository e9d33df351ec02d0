//! Append-only event log with synchronous publish/subscribe.
//!
//! The log owns the only mutable data in the engine: the ordered event list
//! and its version counter. Subscribers are notified inside `append`, after
//! the event has been stored and the counter advanced, so a misbehaving
//! handler can never leave the log half-written.

use std::fmt;

use pok_core::error::DomainError;
use pok_core::event::GameEvent;
use pok_core::storage::KeyValueStore;
use tracing::{debug, info, warn};

use crate::STORAGE_KEY;
use crate::blob::PersistedLog;

/// Handle returned by [`EventLog::subscribe`], used to unsubscribe.
pub type SubscriptionId = u64;

/// What a subscriber listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    /// Every notification, including `Cleared` and `Loaded`.
    All,
    /// Appended events whose type name matches exactly.
    Kind(String),
}

impl Topic {
    /// Subscribes to a single event type name, e.g. `"PokPlaced"`.
    #[must_use]
    pub fn kind(event_type: impl Into<String>) -> Self {
        Self::Kind(event_type.into())
    }

    fn matches(&self, notification: &Notification<'_>) -> bool {
        match (self, notification) {
            (Self::All, _) => true,
            (Self::Kind(kind), Notification::Appended(event)) => event.event_type() == kind,
            (Self::Kind(_), _) => false,
        }
    }
}

/// A message delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification<'a> {
    /// An event was appended, live or replayed during a load.
    Appended(&'a GameEvent),
    /// The log was emptied. Not itself an event.
    Cleared,
    /// A load or import finished replaying `events` historical events.
    /// Everything appended after this is live.
    Loaded {
        /// Number of events replayed.
        events: usize,
    },
}

type Handler = Box<dyn FnMut(&Notification<'_>)>;

struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// The append-only game log.
pub struct EventLog {
    events: Vec<GameEvent>,
    version: u64,
    subscriptions: Vec<Subscription>,
    next_subscription_id: SubscriptionId,
    storage_key: String,
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("events", &self.events.len())
            .field("version", &self.version)
            .field("subscriptions", &self.subscriptions.len())
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Creates an empty log persisting under [`STORAGE_KEY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage_key(STORAGE_KEY)
    }

    /// Creates an empty log persisting under `key`.
    #[must_use]
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            version: 0,
            subscriptions: Vec::new(),
            next_subscription_id: 1,
            storage_key: key.into(),
        }
    }

    /// Returns the storage key used by `save` and `load`.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns the version of the last appended event, or 0 if empty.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Borrows the stored events in log order.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Returns a copy of the full ordered log.
    #[must_use]
    pub fn get_all_events(&self) -> Vec<GameEvent> {
        self.events.clone()
    }

    /// Returns copies of the events with a version strictly greater than
    /// `version`.
    #[must_use]
    pub fn get_events_since(&self, version: u64) -> Vec<GameEvent> {
        self.events
            .iter()
            .filter(|event| event.version > version)
            .cloned()
            .collect()
    }

    /// Assigns the next version to `event`, stores it, then notifies
    /// subscribers (wildcard first, then type-specific, each in registration
    /// order). Returns the stored event.
    pub fn append(&mut self, mut event: GameEvent) -> GameEvent {
        self.version += 1;
        event.version = self.version;
        debug!(version = event.version, event_type = event.event_type(), "appending event");
        self.events.push(event);

        let stored = &self.events[self.events.len() - 1];
        publish(&mut self.subscriptions, &Notification::Appended(stored));
        stored.clone()
    }

    /// Registers `handler` for `topic` and returns its subscription handle.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification<'_>) + 'static,
    {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            handler: Box::new(handler),
        });
        id
    }

    /// Removes a subscription. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    /// Empties the log and resets the version to 0, then publishes
    /// `Notification::Cleared`. The reset itself is not recorded.
    pub fn clear(&mut self) {
        info!(discarded = self.events.len(), "clearing event log");
        self.events.clear();
        self.version = 0;
        publish(&mut self.subscriptions, &Notification::Cleared);
    }

    /// Encodes the log as the persisted blob JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if encoding fails.
    pub fn export_json(&self) -> Result<String, DomainError> {
        PersistedLog {
            events: self.events.clone(),
            version: self.version,
        }
        .to_json()
    }

    /// Writes the log to `store` under this log's storage key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if encoding or the write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), DomainError> {
        let json = self.export_json()?;
        store.set(&self.storage_key, &json)?;
        info!(events = self.events.len(), version = self.version, "saved event log");
        Ok(())
    }

    /// Replaces the log with the blob stored under this log's storage key.
    ///
    /// Clears the log, replays every stored event with its original version,
    /// then publishes `Notification::Loaded`. Returns `Ok(false)` if nothing
    /// was stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the medium cannot be read or the
    /// blob is corrupt. The log is left empty in that case.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, DomainError> {
        self.clear();
        let raw = match store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!(error = %e, "event log storage unavailable");
                return Err(e);
            }
        };
        self.restore(&raw)?;
        Ok(true)
    }

    /// Replaces the log with an exported blob, following the same sequence
    /// as [`EventLog::load`]. Returns the number of replayed events.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the blob is corrupt. The log is
    /// left empty in that case.
    pub fn import_json(&mut self, json: &str) -> Result<usize, DomainError> {
        self.clear();
        self.restore(json)
    }

    fn restore(&mut self, json: &str) -> Result<usize, DomainError> {
        let blob = PersistedLog::from_json(json).inspect_err(|e| {
            warn!(error = %e, "discarding unreadable event log");
        })?;

        let replayed = blob.events.len();
        for event in blob.events {
            self.version = event.version;
            self.events.push(event);
            let stored = &self.events[self.events.len() - 1];
            publish(&mut self.subscriptions, &Notification::Appended(stored));
        }

        info!(events = replayed, version = self.version, "loaded event log");
        publish(&mut self.subscriptions, &Notification::Loaded { events: replayed });
        Ok(replayed)
    }
}

fn publish(subscriptions: &mut [Subscription], notification: &Notification<'_>) {
    for subscription in subscriptions
        .iter_mut()
        .filter(|s| s.topic == Topic::All)
    {
        (subscription.handler)(notification);
    }
    for subscription in subscriptions
        .iter_mut()
        .filter(|s| s.topic != Topic::All && s.topic.matches(notification))
    {
        (subscription.handler)(notification);
    }
}
