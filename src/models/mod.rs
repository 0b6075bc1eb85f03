//! Data structures for the pairing engine: players, rounds, tournament state.

mod player;
mod round;
mod tournament;

pub use player::{parse_factions, Player, PlayerId, PlayerStanding};
pub use round::{GameScore, PlayerResult, RoundPairings, RoundRecord, TableNumber};
pub use tournament::{default_bye_score, Tournament, TournamentError};
