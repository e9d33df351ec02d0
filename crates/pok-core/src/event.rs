//! Game event envelope and payloads.
//!
//! Events carry raw facts only. Zones, points, remaining token counts and
//! totals are never stored here; they are recomputed by replaying the log.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::player::Player;

/// Type name of [`GameStarted`].
pub const GAME_STARTED_EVENT_TYPE: &str = "GameStarted";
/// Type name of [`PokPlaced`].
pub const POK_PLACED_EVENT_TYPE: &str = "PokPlaced";
/// Type name of [`PokMoved`].
pub const POK_MOVED_EVENT_TYPE: &str = "PokMoved";
/// Type name of [`PokRemoved`].
pub const POK_REMOVED_EVENT_TYPE: &str = "PokRemoved";
/// Type name of [`RoundStarted`].
pub const ROUND_STARTED_EVENT_TYPE: &str = "RoundStarted";
/// Type name of [`RoundEnded`].
pub const ROUND_ENDED_EVENT_TYPE: &str = "RoundEnded";
/// Type name of [`TableFlipped`].
pub const TABLE_FLIPPED_EVENT_TYPE: &str = "TableFlipped";
/// Type name of [`EventKind::GameReset`].
pub const GAME_RESET_EVENT_TYPE: &str = "GameReset";

/// Emitted when a game begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStarted {
    /// The player who throws first in round 0.
    pub starting_player_id: Player,
    /// Optional display name for red.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_name: Option<String>,
    /// Optional display name for blue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue_name: Option<String>,
}

/// Emitted when a player places a pok on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokPlaced {
    /// The pok identifier.
    pub pok_id: String,
    /// The player who placed it.
    pub player_id: Player,
    /// Horizontal position in percent of table width.
    pub x: f64,
    /// Vertical position in percent of table height.
    pub y: f64,
}

/// Emitted when a placed pok is dragged to a new position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokMoved {
    /// The pok identifier.
    pub pok_id: String,
    /// New horizontal position in percent.
    pub x: f64,
    /// New vertical position in percent.
    pub y: f64,
}

/// Emitted when a pok is taken back off the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokRemoved {
    /// The pok identifier.
    pub pok_id: String,
}

/// Emitted when a new round begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStarted {
    /// Zero-based round number.
    pub round_number: u32,
    /// The player who throws first in this round.
    pub starting_player_id: Player,
}

/// Emitted when a completed round is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEnded {
    /// Zero-based round number.
    pub round_number: u32,
}

/// Emitted when the table orientation changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFlipped {
    /// Whether the table is now flipped.
    pub is_flipped: bool,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A game has started.
    GameStarted(GameStarted),
    /// A pok has been placed.
    PokPlaced(PokPlaced),
    /// A pok has been moved.
    PokMoved(PokMoved),
    /// A pok has been removed.
    PokRemoved(PokRemoved),
    /// A round has started.
    RoundStarted(RoundStarted),
    /// A round has been scored.
    RoundEnded(RoundEnded),
    /// The table has been flipped.
    TableFlipped(TableFlipped),
    /// The game has been reset to its initial state.
    GameReset,
    /// An event type this build does not know. Kept verbatim so it survives
    /// a save/load cycle; the projection ignores it.
    Unknown {
        /// The type name as found in the log.
        event_type: String,
        /// The raw payload.
        data: Value,
    },
}

impl EventKind {
    /// Returns the event type name (used for subscription routing and the
    /// persisted `type` field).
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::GameStarted(_) => GAME_STARTED_EVENT_TYPE,
            Self::PokPlaced(_) => POK_PLACED_EVENT_TYPE,
            Self::PokMoved(_) => POK_MOVED_EVENT_TYPE,
            Self::PokRemoved(_) => POK_REMOVED_EVENT_TYPE,
            Self::RoundStarted(_) => ROUND_STARTED_EVENT_TYPE,
            Self::RoundEnded(_) => ROUND_ENDED_EVENT_TYPE,
            Self::TableFlipped(_) => TABLE_FLIPPED_EVENT_TYPE,
            Self::GameReset => GAME_RESET_EVENT_TYPE,
            Self::Unknown { event_type, .. } => event_type,
        }
    }

    fn to_data(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::GameStarted(payload) => serde_json::to_value(payload),
            Self::PokPlaced(payload) => serde_json::to_value(payload),
            Self::PokMoved(payload) => serde_json::to_value(payload),
            Self::PokRemoved(payload) => serde_json::to_value(payload),
            Self::RoundStarted(payload) => serde_json::to_value(payload),
            Self::RoundEnded(payload) => serde_json::to_value(payload),
            Self::TableFlipped(payload) => serde_json::to_value(payload),
            Self::GameReset => Ok(Value::Object(serde_json::Map::new())),
            Self::Unknown { data, .. } => Ok(data.clone()),
        }
    }

    fn from_parts(event_type: String, data: Value) -> Result<Self, serde_json::Error> {
        Ok(match event_type.as_str() {
            GAME_STARTED_EVENT_TYPE => Self::GameStarted(serde_json::from_value(data)?),
            POK_PLACED_EVENT_TYPE => Self::PokPlaced(serde_json::from_value(data)?),
            POK_MOVED_EVENT_TYPE => Self::PokMoved(serde_json::from_value(data)?),
            POK_REMOVED_EVENT_TYPE => Self::PokRemoved(serde_json::from_value(data)?),
            ROUND_STARTED_EVENT_TYPE => Self::RoundStarted(serde_json::from_value(data)?),
            ROUND_ENDED_EVENT_TYPE => Self::RoundEnded(serde_json::from_value(data)?),
            TABLE_FLIPPED_EVENT_TYPE => Self::TableFlipped(serde_json::from_value(data)?),
            GAME_RESET_EVENT_TYPE => Self::GameReset,
            _ => Self::Unknown { event_type, data },
        })
    }
}

/// An immutable fact in the game log.
///
/// `version` is zero until the event log assigns it on append.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct GameEvent {
    /// Event-specific payload.
    pub kind: EventKind,
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
    /// Position in the log, starting at 1.
    pub version: u64,
}

impl GameEvent {
    /// Creates an event that has not been appended yet.
    #[must_use]
    pub fn new(kind: EventKind, timestamp: i64) -> Self {
        Self {
            kind,
            timestamp,
            version: 0,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.kind.event_type()
    }
}

/// Wire shape: `{ "type", "data", "timestamp", "version" }`.
#[derive(Serialize, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
    timestamp: i64,
    version: u64,
}

impl Serialize for GameEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = self.kind.to_data().map_err(serde::ser::Error::custom)?;
        RawEvent {
            event_type: self.event_type().to_owned(),
            data,
            timestamp: self.timestamp,
            version: self.version,
        }
        .serialize(serializer)
    }
}

impl TryFrom<RawEvent> for GameEvent {
    type Error = serde_json::Error;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: EventKind::from_parts(raw.event_type, raw.data)?,
            timestamp: raw.timestamp,
            version: raw.version,
        })
    }
}
