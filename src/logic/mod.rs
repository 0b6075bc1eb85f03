//! Pairing logic: ranking, grouping, opponent matching, tables, byes.

mod pairing;
mod ranking;
mod round;
mod tables;

pub use pairing::{match_groups, pairing_penalty, resolve_odd_groups};
pub use ranking::{pairing_groups, ranked_players, standings};
pub use round::generate_next_round;
pub use tables::assign_tables;
