//! Swiss pairing engine for tabletop tournaments.
//!
//! Given a roster of players and their accumulated results, the engine
//! ranks the field, forms score-tier groups, matches opponents while
//! minimizing repeat and affinity collisions, assigns physical tables
//! avoiding repeats, and allocates a bye for odd-sized fields. Randomness
//! is injected through any [`rand::Rng`], so seeded runs replay exactly.

pub mod logic;
pub mod models;

pub use logic::{
    assign_tables, generate_next_round, match_groups, pairing_groups, pairing_penalty,
    ranked_players, resolve_odd_groups, standings,
};
pub use models::{
    default_bye_score, parse_factions, GameScore, Player, PlayerId, PlayerResult, PlayerStanding,
    RoundPairings, RoundRecord, TableNumber, Tournament, TournamentError,
};
