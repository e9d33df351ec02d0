//! Player identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The red side.
    Red,
    /// The blue side.
    Blue,
}

impl Player {
    /// Both players, red first.
    pub const ALL: [Player; 2] = [Player::Red, Player::Blue];

    /// Returns the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Returns the wire identifier (`"red"` or `"blue"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }

    /// Canonical display label used when no name was given at game start.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            other => Err(format!("unknown player '{other}' (expected red or blue)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_swaps_sides() {
        assert_eq!(Player::Red.opponent(), Player::Blue);
        assert_eq!(Player::Blue.opponent(), Player::Red);
    }

    #[test]
    fn test_serializes_as_lowercase_id() {
        assert_eq!(serde_json::to_value(Player::Blue).unwrap(), "blue");
        let parsed: Player = serde_json::from_value(serde_json::json!("red")).unwrap();
        assert_eq!(parsed, Player::Red);
    }

    #[test]
    fn test_from_str_rejects_unknown_player() {
        assert_eq!("Blue".parse::<Player>(), Ok(Player::Blue));
        assert!("green".parse::<Player>().is_err());
    }
}
