//! Ranking and grouping of active players.

use crate::models::{Player, PlayerId, PlayerStanding, Tournament};
use rand::seq::SliceRandom;
use rand::Rng;

/// The tie-break chain, in priority order: total tournament points,
/// strength of schedule, total control points, total kill points.
fn rank_key(t: &Tournament, p: &Player) -> (u32, u32, u32, u32) {
    (
        p.tournament_points(),
        t.strength_of_schedule(p),
        p.control_points(),
        p.kill_points(),
    )
}

/// Active players sorted best-to-worst by the tie-break chain. The sort is
/// stable, so full ties keep registration order.
pub fn ranked_players(t: &Tournament) -> Vec<&Player> {
    let mut scored: Vec<((u32, u32, u32, u32), &Player)> = t
        .active_players()
        .map(|p| (rank_key(t, p), p))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, p)| p).collect()
}

/// Ranked display rows for all active players.
pub fn standings(t: &Tournament) -> Vec<PlayerStanding> {
    ranked_players(t)
        .into_iter()
        .map(|p| PlayerStanding {
            id: p.id,
            name: p.name.clone(),
            faction: p.faction(),
            team: p.team.clone(),
            country: p.country.clone(),
            tournament_points: p.tournament_points(),
            strength_of_schedule: t.strength_of_schedule(p),
            control_points: p.control_points(),
            kill_points: p.kill_points(),
        })
        .collect()
}

/// Partition the active players into pairing groups for the round about to
/// be generated.
///
/// First round: no history exists, so everyone lands in a single uniformly
/// shuffled group. Later rounds: the ranked list is split wherever total
/// tournament points change, yielding one group per score tier,
/// best-to-worst.
pub fn pairing_groups(t: &Tournament, rng: &mut impl Rng) -> Vec<Vec<PlayerId>> {
    if t.current_round < 0 {
        let mut ids: Vec<PlayerId> = t.active_players().map(|p| p.id).collect();
        ids.shuffle(rng);
        return vec![ids];
    }

    let mut groups: Vec<Vec<PlayerId>> = Vec::new();
    let mut group: Vec<PlayerId> = Vec::new();
    let mut last_tp: Option<u32> = None;
    for p in ranked_players(t) {
        let tp = p.tournament_points();
        if last_tp != Some(tp) {
            last_tp = Some(tp);
            if !group.is_empty() {
                groups.push(std::mem::take(&mut group));
            }
        }
        group.push(p.id);
    }
    if !group.is_empty() {
        groups.push(group);
    }
    groups
}
