//! Table assignment: keep players off tables they have already played on.

use crate::models::{PlayerId, RoundPairings, TableNumber, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

/// Assign a table to every pair, in matching order, from a shared pool of
/// 1..=capacity (each table used at most once per round).
///
/// Per pair (A, B): drop tables A has played on if that leaves any, then
/// also drop tables B has played on if that still leaves any; if dropping
/// A's tables empties the pool, try dropping only B's; if that fails too,
/// the whole remaining pool is up for grabs. The pick is uniform over
/// whatever candidate set survives. Earlier pairs get first claim on fresh
/// tables; this is per-pair greedy, not a global optimum.
pub fn assign_tables(
    t: &Tournament,
    pairs: &[(PlayerId, PlayerId)],
    rng: &mut impl Rng,
) -> Result<RoundPairings, TournamentError> {
    // BTreeSet keeps the pool ordered so seeded runs replay identically
    let mut pool: BTreeSet<TableNumber> = (1..=t.tables).collect();
    let mut assigned = RoundPairings::new();

    for &(a_id, b_id) in pairs {
        if pool.is_empty() {
            return Err(TournamentError::InsufficientTables {
                pairs: pairs.len(),
                tables: t.tables,
            });
        }
        let a = t.player(a_id).ok_or(TournamentError::UnknownPlayer(a_id))?;
        let b = t.player(b_id).ok_or(TournamentError::UnknownPlayer(b_id))?;
        let a_played: HashSet<TableNumber> = a.tables_played().collect();
        let b_played: HashSet<TableNumber> = b.tables_played().collect();

        let mut candidates: Vec<TableNumber> = pool.iter().copied().collect();
        let fresh_for_a: Vec<TableNumber> = candidates
            .iter()
            .copied()
            .filter(|n| !a_played.contains(n))
            .collect();
        if !fresh_for_a.is_empty() {
            let fresh_for_both: Vec<TableNumber> = fresh_for_a
                .iter()
                .copied()
                .filter(|n| !b_played.contains(n))
                .collect();
            candidates = if fresh_for_both.is_empty() {
                fresh_for_a
            } else {
                fresh_for_both
            };
        } else {
            let fresh_for_b: Vec<TableNumber> = candidates
                .iter()
                .copied()
                .filter(|n| !b_played.contains(n))
                .collect();
            if !fresh_for_b.is_empty() {
                candidates = fresh_for_b;
            }
        }

        let table = candidates
            .choose(rng)
            .copied()
            .ok_or(TournamentError::InsufficientTables {
                pairs: pairs.len(),
                tables: t.tables,
            })?;
        pool.remove(&table);
        log::debug!("table {} -> {} vs {}", table, a.name, b.name);
        assigned.insert(table, (a_id, b_id));
    }

    Ok(assigned)
}
