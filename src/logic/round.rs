//! Round generation: rank, group, match, seat, and commit.

use crate::logic::pairing::{match_groups, resolve_odd_groups};
use crate::logic::ranking::pairing_groups;
use crate::logic::tables::assign_tables;
use crate::models::{PlayerId, RoundPairings, RoundRecord, Tournament, TournamentError};
use rand::Rng;

/// Generate the pairings for the next round.
///
/// Ranks and groups the active players, resolves odd groups (selecting at
/// most one bye), matches opponents within each group, assigns tables, then
/// commits: every paired player gets a pending history record, the bye gets
/// its fixed score, the round counter advances and the round is appended to
/// the pairing and bye logs. Returns the table-to-pair mapping and the bye.
///
/// All fallible work happens before the first mutation, so on error the
/// tournament is left exactly as it was.
pub fn generate_next_round(
    t: &mut Tournament,
    rng: &mut impl Rng,
) -> Result<(RoundPairings, Option<PlayerId>), TournamentError> {
    if t.active_players().count() < 2 {
        return Err(TournamentError::InsufficientPlayers);
    }

    let mut groups = pairing_groups(t, rng);
    log::debug!(
        "round {}: group sizes {:?}",
        t.current_round + 2,
        groups.iter().map(Vec::len).collect::<Vec<_>>()
    );
    let bye = resolve_odd_groups(t, &mut groups, rng);
    let pairs = match_groups(t, groups)?;
    let seated = assign_tables(t, &pairs, rng)?;

    // nothing can fail past this point; commit the round
    for (&table, &(a, b)) in &seated {
        if let Some(p) = t.player_mut(a) {
            p.history.push(RoundRecord::paired(b, table));
        }
        if let Some(p) = t.player_mut(b) {
            p.history.push(RoundRecord::paired(a, table));
        }
    }
    if let Some(id) = bye {
        let bye_score = t.bye_score;
        if let Some(p) = t.player_mut(id) {
            p.history.push(RoundRecord::bye(bye_score));
        }
    }
    t.current_round += 1;
    t.pairings.push(seated.clone());
    t.byes.push(bye);
    log::info!(
        "generated round {}: {} pairings, bye: {}",
        t.current_round + 1,
        seated.len(),
        bye.map_or_else(|| "none".to_string(), |id| id.to_string())
    );

    Ok((seated, bye))
}
