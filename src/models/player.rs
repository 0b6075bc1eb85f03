//! Player record: identity, activity flag, and per-round history.

use crate::models::round::{RoundRecord, TableNumber};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairings and lookups).
pub type PlayerId = Uuid;

/// Parse a free-form faction string: split on commas, trim whitespace,
/// drop empty segments. An already-structured list goes straight into
/// [`Player::new`] instead.
pub fn parse_factions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Standings view of a player (for display / API responses).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub faction: String,
    pub team: Option<String>,
    pub country: Option<String>,
    pub tournament_points: u32,
    pub strength_of_schedule: u32,
    pub control_points: u32,
    pub kill_points: u32,
}

/// A tournament participant.
///
/// History is append-only: one [`RoundRecord`] per round the player was
/// paired or byed, in round order. A player who is deactivated and later
/// reactivated simply has no records for the rounds they sat out, so the
/// history length may lag the tournament's round counter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Declared factions; order matters (the first is the display default).
    pub factions: Vec<String>,
    pub team: Option<String>,
    pub country: Option<String>,
    /// Eligible for current and future pairings. Inactive players are
    /// skipped by ranking/pairing but keep their history.
    pub active: bool,
    pub history: Vec<RoundRecord>,
}

impl Player {
    /// Create a new active player with a generated id and no history.
    pub fn new(name: impl Into<String>, factions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            factions,
            team: None,
            country: None,
            active: true,
            history: Vec::new(),
        }
    }

    /// Create a player from a comma-separated faction string.
    pub fn with_faction_str(name: impl Into<String>, factions: &str) -> Self {
        Self::new(name, parse_factions(factions))
    }

    /// Comma-joined faction list for display.
    pub fn faction(&self) -> String {
        self.factions.join(", ")
    }

    /// Total tournament points over all recorded rounds.
    pub fn tournament_points(&self) -> u32 {
        self.history
            .iter()
            .filter_map(|r| r.score)
            .map(|s| s.tournament_points)
            .sum()
    }

    /// Total control points over all recorded rounds.
    pub fn control_points(&self) -> u32 {
        self.history
            .iter()
            .filter_map(|r| r.score)
            .map(|s| s.control_points)
            .sum()
    }

    /// Total kill points over all recorded rounds.
    pub fn kill_points(&self) -> u32 {
        self.history
            .iter()
            .filter_map(|r| r.score)
            .map(|s| s.kill_points)
            .sum()
    }

    /// Every opponent this player has faced (byes excluded).
    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.history.iter().filter_map(|r| r.opponent)
    }

    /// Whether this player has already faced `other` this tournament.
    pub fn has_played(&self, other: PlayerId) -> bool {
        self.opponents().any(|o| o == other)
    }

    /// Every table this player has occupied (byes excluded).
    pub fn tables_played(&self) -> impl Iterator<Item = TableNumber> + '_ {
        self.history.iter().filter_map(|r| r.table)
    }

    /// Whether this player has already played on `table`.
    pub fn has_played_table(&self, table: TableNumber) -> bool {
        self.tables_played().any(|t| t == table)
    }

    /// Every faction an opponent has fielded against this player.
    pub fn factions_faced(&self) -> impl Iterator<Item = &str> {
        self.history
            .iter()
            .filter_map(|r| r.opponent_faction.as_deref())
    }

    /// Whether this player has already faced `faction`.
    pub fn has_faced_faction(&self, faction: &str) -> bool {
        self.factions_faced().any(|f| f == faction)
    }

    /// Number of rounds this player has been paired or byed into.
    pub fn rounds_participated(&self) -> usize {
        self.history.len()
    }

    /// The record for the most recent round this player participated in.
    pub fn current_record(&self) -> Option<&RoundRecord> {
        self.history.last()
    }

    /// Mutable access to the most recent round record (result entry).
    pub fn current_record_mut(&mut self) -> Option<&mut RoundRecord> {
        self.history.last_mut()
    }
}
