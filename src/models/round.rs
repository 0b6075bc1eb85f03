//! Per-round data: game scores, history records, and the pairing table.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Physical table number. Tables are numbered from 1.
pub type TableNumber = u32;

/// Points earned by one player in one game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    /// Primary ranking score (tp).
    pub tournament_points: u32,
    /// First secondary tie-break score (cp).
    pub control_points: u32,
    /// Second secondary tie-break score (kp, enemy models destroyed).
    pub kill_points: u32,
}

impl GameScore {
    pub fn new(tournament_points: u32, control_points: u32, kill_points: u32) -> Self {
        Self {
            tournament_points,
            control_points,
            kill_points,
        }
    }
}

/// One round of a player's history. A record is appended when the round is
/// generated; `score` and `opponent_faction` are filled in when the result
/// for that table is recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// None until the result for this round has been recorded.
    pub score: Option<GameScore>,
    /// None for a bye round.
    pub opponent: Option<PlayerId>,
    /// None for a bye round.
    pub table: Option<TableNumber>,
    /// Faction the opponent fielded; None for byes and unrecorded results.
    pub opponent_faction: Option<String>,
}

impl RoundRecord {
    /// Record for a player seated against an opponent; result still pending.
    pub fn paired(opponent: PlayerId, table: TableNumber) -> Self {
        Self {
            score: None,
            opponent: Some(opponent),
            table: Some(table),
            opponent_faction: None,
        }
    }

    /// Record for a bye round: fixed score, no opponent, no table.
    pub fn bye(score: GameScore) -> Self {
        Self {
            score: Some(score),
            opponent: None,
            table: None,
            opponent_faction: None,
        }
    }

    /// Whether this round was a bye.
    pub fn is_bye(&self) -> bool {
        self.opponent.is_none()
    }
}

/// One round's pairings: table number to the pair seated there.
pub type RoundPairings = HashMap<TableNumber, (PlayerId, PlayerId)>;

/// One side of a reported game result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub score: GameScore,
    /// Faction this player fielded in the game.
    pub faction: String,
}

impl PlayerResult {
    pub fn new(player: PlayerId, score: GameScore, faction: impl Into<String>) -> Self {
        Self {
            player,
            score,
            faction: faction.into(),
        }
    }
}
