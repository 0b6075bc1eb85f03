//! Odd-group resolution, bye selection, and opponent matching.

use crate::models::{Player, PlayerId, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Fix odd-sized groups, best tier first: the last group gives up one
/// player as the bye, every other odd group pulls the top-ranked player of
/// the next tier into its tail. At most one bye per round.
pub fn resolve_odd_groups(
    t: &Tournament,
    groups: &mut [Vec<PlayerId>],
    rng: &mut impl Rng,
) -> Option<PlayerId> {
    let count = groups.len();
    let mut bye = None;
    for i in 0..count {
        if groups[i].len() % 2 == 0 {
            continue;
        }
        if i + 1 == count {
            bye = draw_bye(t, &mut groups[i], rng);
        } else {
            // promote the head of the lower tier
            let promoted = groups[i + 1].remove(0);
            groups[i].push(promoted);
        }
    }
    bye
}

/// Draw the bye uniformly from the group, preferring players who have not
/// had one yet. Once every active player has had a bye the exclusion set
/// starts over, so the draw never deadlocks.
fn draw_bye(t: &Tournament, group: &mut Vec<PlayerId>, rng: &mut impl Rng) -> Option<PlayerId> {
    if group.is_empty() {
        return None;
    }
    let mut already_byed: HashSet<PlayerId> = if t.exclude_repeat_byes {
        t.byes.iter().flatten().copied().collect()
    } else {
        HashSet::new()
    };
    if t.active_players().all(|p| already_byed.contains(&p.id)) {
        already_byed.clear();
    }
    let candidates: Vec<usize> = group
        .iter()
        .enumerate()
        .filter(|(_, id)| !already_byed.contains(id))
        .map(|(i, _)| i)
        .collect();
    let index = match candidates.choose(rng) {
        Some(&i) => i,
        // everyone in this tier already had a bye; draw from the whole group
        None => rng.gen_range(0..group.len()),
    };
    Some(group.remove(index))
}

/// Collision penalty for seating `candidate` against `anchor`. Lower is
/// better. The weights act as a bit mask, so a single rematch always
/// outweighs any combination of lesser collisions.
pub fn pairing_penalty(anchor: &Player, candidate: &Player) -> u32 {
    let mut penalty = 0;
    if anchor.has_played(candidate.id) {
        penalty += 1000;
    }
    if let (Some(ta), Some(tb)) = (&anchor.team, &candidate.team) {
        if !ta.is_empty() && ta == tb {
            penalty += 100;
        }
    }
    if candidate
        .factions
        .iter()
        .any(|f| anchor.has_faced_faction(f))
    {
        penalty += 10;
    }
    if candidate
        .factions
        .iter()
        .any(|f| anchor.factions.contains(f))
    {
        penalty += 1;
    }
    penalty
}

/// Pair the players inside each group. The highest-ranked remaining player
/// anchors each pair and gets the candidate with the lowest penalty; on a
/// tie the candidate earliest in the group's current order wins. Greedy and
/// deliberately myopic: the per-pair minimum, not a global matching.
pub fn match_groups(
    t: &Tournament,
    groups: Vec<Vec<PlayerId>>,
) -> Result<Vec<(PlayerId, PlayerId)>, TournamentError> {
    let mut pairs = Vec::new();
    for mut group in groups {
        while group.len() >= 2 {
            let anchor_id = group.remove(0);
            let anchor = t
                .player(anchor_id)
                .ok_or(TournamentError::UnknownPlayer(anchor_id))?;
            let mut best: Option<(u32, usize)> = None;
            for (i, &candidate_id) in group.iter().enumerate() {
                let candidate = t
                    .player(candidate_id)
                    .ok_or(TournamentError::UnknownPlayer(candidate_id))?;
                let penalty = pairing_penalty(anchor, candidate);
                if best.map_or(true, |(lowest, _)| penalty < lowest) {
                    best = Some((penalty, i));
                }
            }
            if let Some((_, i)) = best {
                let opponent_id = group.remove(i);
                pairs.push((anchor_id, opponent_id));
            }
        }
        // a leftover player means an odd group slipped through unresolved
        debug_assert!(group.is_empty());
    }
    Ok(pairs)
}
