//! Tournament state: player registry, round logs, and result entry.

use crate::models::player::{Player, PlayerId};
use crate::models::round::{GameScore, PlayerResult, RoundPairings, TableNumber};
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A player with this id is already registered.
    DuplicateIdentity(PlayerId),
    /// Referenced player id is not in the registry.
    UnknownPlayer(PlayerId),
    /// Fewer than 2 active players when generating a round.
    InsufficientPlayers,
    /// More pairs this round than tables in the pool.
    InsufficientTables { pairs: usize, tables: u32 },
    /// Reported result does not match the pairing at that table this round.
    TableMismatch { table: TableNumber },
    /// A player's history diverges from the round log; state is corrupted.
    HistoryLengthMismatch { player: PlayerId },
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateIdentity(id) => {
                write!(f, "Player with id {} is already registered", id)
            }
            TournamentError::UnknownPlayer(id) => write!(f, "No player with id {}", id),
            TournamentError::InsufficientPlayers => {
                write!(f, "Need at least 2 active players to generate a round")
            }
            TournamentError::InsufficientTables { pairs, tables } => {
                write!(f, "{} pairs do not fit on {} tables", pairs, tables)
            }
            TournamentError::TableMismatch { table } => {
                write!(f, "These players were not paired at table {} this round", table)
            }
            TournamentError::HistoryLengthMismatch { player } => {
                write!(f, "History of player {} does not match the round log", player)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Default bye score for a given maximum game score: 1 tp, 3 cp, half the
/// maximum as kp. This is the Masters 2013 convention, not a general rule;
/// override [`Tournament::bye_score`] if the event scores byes differently.
pub fn default_bye_score(points: u32) -> GameScore {
    GameScore::new(1, 3, points / 2)
}

/// Full tournament state: registry, round logs, and configuration.
///
/// All randomness is injected by the caller (see [`crate::logic`]), so the
/// struct itself is plain data and snapshots losslessly with serde.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Registry in insertion order; ids are unique. Players are never
    /// removed, only deactivated.
    pub players: Vec<Player>,
    /// Number of physical tables available (numbered 1..=tables).
    pub tables: u32,
    /// Maximum tournament points obtainable in one game.
    pub points: u32,
    /// Fixed score awarded for a bye round.
    pub bye_score: GameScore,
    /// Prefer players without a prior bye when drawing the bye.
    pub exclude_repeat_byes: bool,
    /// One entry per generated round: table to the pair seated there.
    pub pairings: Vec<RoundPairings>,
    /// One entry per generated round: the bye, if any.
    pub byes: Vec<Option<PlayerId>>,
    /// -1 until the first round has been generated.
    pub current_round: i32,
}

impl Tournament {
    /// Create an empty tournament with the given table capacity and
    /// maximum game score (50 in the source event).
    pub fn new(tables: u32, points: u32) -> Self {
        Self {
            players: Vec::new(),
            tables,
            points,
            bye_score: default_bye_score(points),
            exclude_repeat_byes: true,
            pairings: Vec::new(),
            byes: Vec::new(),
            current_round: -1,
        }
    }

    /// Create a tournament with an initial roster.
    pub fn with_players(
        players: Vec<Player>,
        tables: u32,
        points: u32,
    ) -> Result<Self, TournamentError> {
        let mut t = Self::new(tables, points);
        for p in players {
            t.register(p)?;
        }
        Ok(t)
    }

    /// Register a player. Ids must be unique within the tournament.
    pub fn register(&mut self, player: Player) -> Result<(), TournamentError> {
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(TournamentError::DuplicateIdentity(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    /// Reference to a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable reference to a player by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players eligible for the next round.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.active)
    }

    /// Exclude a player from current and future pairings. History is kept.
    pub fn deactivate(&mut self, id: PlayerId) -> Result<(), TournamentError> {
        let p = self
            .player_mut(id)
            .ok_or(TournamentError::UnknownPlayer(id))?;
        p.active = false;
        Ok(())
    }

    /// Make a player eligible for future pairings again.
    pub fn reactivate(&mut self, id: PlayerId) -> Result<(), TournamentError> {
        let p = self
            .player_mut(id)
            .ok_or(TournamentError::UnknownPlayer(id))?;
        p.active = true;
        Ok(())
    }

    /// Set the number of physical tables (resized as the roster grows).
    pub fn set_tables(&mut self, tables: u32) {
        self.tables = tables;
    }

    /// Number of rounds generated so far.
    pub fn rounds_generated(&self) -> usize {
        self.pairings.len()
    }

    /// Strength of schedule: sum of the *current* total tournament points
    /// of every opponent this player has faced. Byes contribute nothing,
    /// as do opponents missing from the registry.
    pub fn strength_of_schedule(&self, player: &Player) -> u32 {
        player
            .opponents()
            .filter_map(|id| self.player(id))
            .map(|opp| opp.tournament_points())
            .sum()
    }

    /// Record the result of the game at `table` in the current round.
    ///
    /// Each side's score lands on that player's current-round record, and
    /// each side's faction lands on the *opponent's* record. Recording the
    /// same table again overwrites the previous values (idempotent for
    /// identical inputs). Both players are validated before either is
    /// mutated, so a failure leaves the state untouched.
    pub fn record_result(
        &mut self,
        table: TableNumber,
        a: PlayerResult,
        b: PlayerResult,
    ) -> Result<(), TournamentError> {
        if self.current_round < 0 {
            return Err(TournamentError::InvalidState);
        }
        let seated = self
            .pairings
            .last()
            .and_then(|round| round.get(&table))
            .copied()
            .ok_or(TournamentError::TableMismatch { table })?;
        let straight = seated == (a.player, b.player);
        let swapped = seated == (b.player, a.player);
        if !straight && !swapped {
            return Err(TournamentError::TableMismatch { table });
        }
        self.check_current_record(a.player, b.player, table)?;
        self.check_current_record(b.player, a.player, table)?;

        self.write_result(a.player, a.score, b.faction);
        self.write_result(b.player, b.score, a.faction);
        Ok(())
    }

    /// Tables in the current round whose result has not been recorded yet.
    /// The caller is expected to check this before generating the next
    /// round; the engine itself does not enforce completeness.
    pub fn unscored_tables(&self) -> Vec<TableNumber> {
        let round = match self.pairings.last() {
            Some(round) => round,
            None => return Vec::new(),
        };
        let mut missing: Vec<TableNumber> = round
            .iter()
            .filter(|(_, &(a, b))| !self.is_scored(a) || !self.is_scored(b))
            .map(|(&table, _)| table)
            .collect();
        missing.sort_unstable();
        missing
    }

    /// The player's latest history record must belong to the current round:
    /// right table, right opponent. Anything else means the history and the
    /// round log have diverged.
    fn check_current_record(
        &self,
        id: PlayerId,
        opponent: PlayerId,
        table: TableNumber,
    ) -> Result<(), TournamentError> {
        let p = self.player(id).ok_or(TournamentError::UnknownPlayer(id))?;
        match p.current_record() {
            Some(rec) if rec.table == Some(table) && rec.opponent == Some(opponent) => Ok(()),
            _ => Err(TournamentError::HistoryLengthMismatch { player: id }),
        }
    }

    fn write_result(&mut self, id: PlayerId, score: GameScore, opponent_faction: String) {
        // validated by check_current_record before we get here
        if let Some(rec) = self.player_mut(id).and_then(|p| p.current_record_mut()) {
            rec.score = Some(score);
            rec.opponent_faction = Some(opponent_faction);
        }
    }

    fn is_scored(&self, id: PlayerId) -> bool {
        self.player(id)
            .and_then(|p| p.current_record())
            .map_or(false, |rec| rec.score.is_some())
    }
}
