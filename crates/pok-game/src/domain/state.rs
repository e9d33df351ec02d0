//! Derived game state.
//!
//! Every value here is rebuilt from the event log by the projection and
//! never stored. Types derive `Serialize` for display and `PartialEq` so two
//! derivations can be compared for deep equality.

use pok_core::player::Player;
use serde::Serialize;

use super::rules::TOKENS_PER_PLAYER;
use super::zones::ZoneResolution;

/// A pok on the table: raw position plus the zone it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pok {
    /// The pok identifier.
    pub id: String,
    /// The player who placed it.
    pub player_id: Player,
    /// Horizontal position in percent.
    pub x: f64,
    /// Vertical position in percent.
    pub y: f64,
    /// Zone the position lies in.
    pub zone_id: &'static str,
    /// Points awarded.
    pub points: u32,
    /// `false` when the pok sits on an edge and scores the lower zone.
    pub is_high: bool,
    /// The lower zone whose value was awarded, for edge positions.
    pub boundary_zone: Option<&'static str>,
}

impl Pok {
    pub(crate) fn new(id: String, player_id: Player, x: f64, y: f64, zone: ZoneResolution) -> Self {
        Self {
            id,
            player_id,
            x,
            y,
            zone_id: zone.zone_id,
            points: zone.points,
            is_high: zone.is_high,
            boundary_zone: zone.boundary_zone,
        }
    }

    pub(crate) fn set_zone(&mut self, zone: ZoneResolution) {
        self.zone_id = zone.zone_id;
        self.points = zone.points;
        self.is_high = zone.is_high;
        self.boundary_zone = zone.boundary_zone;
    }
}

/// Per-player points within one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundScores {
    /// Red's points.
    pub red: u32,
    /// Blue's points.
    pub blue: u32,
}

impl RoundScores {
    /// Returns the points of `player`.
    #[must_use]
    pub const fn of(&self, player: Player) -> u32 {
        match player {
            Player::Red => self.red,
            Player::Blue => self.blue,
        }
    }

    /// Returns the absolute difference between the two scores.
    #[must_use]
    pub const fn difference(&self) -> u32 {
        self.red.abs_diff(self.blue)
    }

    /// Returns the strictly higher-scoring player, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Player> {
        match self.red.cmp(&self.blue) {
            std::cmp::Ordering::Greater => Some(Player::Red),
            std::cmp::Ordering::Less => Some(Player::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One exchange in which both players throw all their poks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Zero-based round number.
    pub round_number: u32,
    /// The player who throws first.
    pub starting_player_id: Player,
    /// The player who placed the most recent pok, or the starter if none.
    pub current_player_id: Player,
    /// Poks in placement order.
    pub poks: Vec<Pok>,
    /// Id of the most recently inserted pok.
    pub last_placed_pok_id: Option<String>,
    /// Table orientation this round's zones were resolved under. Frozen
    /// once the round is complete.
    pub is_flipped: bool,
    /// Poks red has not yet placed.
    pub red_poks_remaining: usize,
    /// Poks blue has not yet placed.
    pub blue_poks_remaining: usize,
    /// Both players have placed all their poks.
    pub is_complete: bool,
    /// The round's result has been added to the totals.
    pub is_scored: bool,
}

impl Round {
    /// Creates an empty round.
    #[must_use]
    pub fn new(round_number: u32, starting_player_id: Player, is_flipped: bool) -> Self {
        Self {
            round_number,
            starting_player_id,
            current_player_id: starting_player_id,
            poks: Vec::new(),
            last_placed_pok_id: None,
            is_flipped,
            red_poks_remaining: TOKENS_PER_PLAYER,
            blue_poks_remaining: TOKENS_PER_PLAYER,
            is_complete: false,
            is_scored: false,
        }
    }

    /// Returns how many poks `player` still has to place.
    #[must_use]
    pub const fn poks_remaining(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red_poks_remaining,
            Player::Blue => self.blue_poks_remaining,
        }
    }

    /// Sums the points of each player's poks.
    #[must_use]
    pub fn scores(&self) -> RoundScores {
        self.poks
            .iter()
            .fold(RoundScores::default(), |mut scores, pok| {
                match pok.player_id {
                    Player::Red => scores.red += pok.points,
                    Player::Blue => scores.blue += pok.points,
                }
                scores
            })
    }

    /// Looks up a pok by id.
    #[must_use]
    pub fn pok(&self, pok_id: &str) -> Option<&Pok> {
        self.poks.iter().find(|pok| pok.id == pok_id)
    }

    pub(crate) fn pok_mut(&mut self, pok_id: &str) -> Option<&mut Pok> {
        self.poks.iter_mut().find(|pok| pok.id == pok_id)
    }

    /// Recomputes remaining counts and completion from the pok list.
    pub(crate) fn refresh_counts(&mut self) {
        let placed = |player: Player| self.poks.iter().filter(|p| p.player_id == player).count();
        self.red_poks_remaining = TOKENS_PER_PLAYER.saturating_sub(placed(Player::Red));
        self.blue_poks_remaining = TOKENS_PER_PLAYER.saturating_sub(placed(Player::Blue));
        self.is_complete = self.red_poks_remaining == 0 && self.blue_poks_remaining == 0;
    }
}

/// Cumulative score of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    /// Points accumulated over all scored rounds.
    pub total_score: u32,
}

/// Both players' cumulative scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Players {
    /// Red's score.
    pub red: PlayerScore,
    /// Blue's score.
    pub blue: PlayerScore,
}

impl Players {
    /// Returns the score of `player`.
    #[must_use]
    pub const fn get(&self, player: Player) -> &PlayerScore {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }

    pub(crate) fn get_mut(&mut self, player: Player) -> &mut PlayerScore {
        match player {
            Player::Red => &mut self.red,
            Player::Blue => &mut self.blue,
        }
    }
}

/// Display names of both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerNames {
    /// Red's name.
    pub red: String,
    /// Blue's name.
    pub blue: String,
}

impl PlayerNames {
    /// Returns the name of `player`.
    #[must_use]
    pub fn get(&self, player: Player) -> &str {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            red: Player::Red.default_name().to_owned(),
            blue: Player::Blue.default_name().to_owned(),
        }
    }
}

/// The whole game as derived from the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// A `GameStarted` event has been applied.
    pub is_started: bool,
    /// Cumulative scores.
    pub players: Players,
    /// Display names.
    pub player_names: PlayerNames,
    /// Every round so far, oldest first.
    pub rounds: Vec<Round>,
    /// Index into `rounds` of the round in play.
    pub current_round_index: Option<usize>,
    /// Current table orientation.
    pub is_flipped: bool,
}

impl GameState {
    /// Returns the round in play.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_round_index.and_then(|i| self.rounds.get(i))
    }

    pub(crate) fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.current_round_index.and_then(|i| self.rounds.get_mut(i))
    }
}
