//! Integration tests for the matching heuristic, ranking chain, and
//! grouping rules.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use swiss_pairing::{
    match_groups, pairing_groups, pairing_penalty, parse_factions, ranked_players,
    resolve_odd_groups, standings, GameScore, Player, PlayerId, RoundRecord, Tournament,
};

fn played(opponent: PlayerId, table: u32, score: GameScore, their_faction: &str) -> RoundRecord {
    RoundRecord {
        score: Some(score),
        opponent: Some(opponent),
        table: Some(table),
        opponent_faction: Some(their_faction.to_owned()),
    }
}

#[test]
fn parse_factions_trims_and_drops_empties() {
    assert_eq!(
        parse_factions(" Khador , Cygnar,,Menoth "),
        vec!["Khador", "Cygnar", "Menoth"]
    );
    assert!(parse_factions("  ,").is_empty());
    let p = Player::with_faction_str("Anna", "Khador, Cygnar");
    assert_eq!(p.faction(), "Khador, Cygnar");
}

#[test]
fn penalty_weights_form_a_bit_mask() {
    let mut anchor = Player::with_faction_str("Anna", "Khador");
    anchor.team = Some("Bears".to_owned());

    let mut rematch = Player::with_faction_str("Bruno", "Cygnar");
    anchor
        .history
        .push(played(rematch.id, 1, GameScore::new(3, 0, 0), "Cygnar"));
    // rematch (+1000) and a faction already faced (+10)
    assert_eq!(pairing_penalty(&anchor, &rematch), 1010);

    let mut teammate = Player::with_faction_str("Carla", "Menoth");
    teammate.team = Some("Bears".to_owned());
    assert_eq!(pairing_penalty(&anchor, &teammate), 100);

    let faced_faction = Player::with_faction_str("Dara", "Cygnar");
    assert_eq!(pairing_penalty(&anchor, &faced_faction), 10);

    let mirror = Player::with_faction_str("Egon", "Khador");
    assert_eq!(pairing_penalty(&anchor, &mirror), 1);

    let clean = Player::with_faction_str("Finn", "Legion");
    assert_eq!(pairing_penalty(&anchor, &clean), 0);

    rematch.team = Some("Bears".to_owned());
    rematch.factions.push("Khador".to_owned());
    // everything at once: 1000 + 100 + 10 + 1
    assert_eq!(pairing_penalty(&anchor, &rematch), 1111);
}

#[test]
fn empty_team_never_counts_as_a_teammate() {
    let mut anchor = Player::with_faction_str("Anna", "Khador");
    anchor.team = Some(String::new());
    let mut candidate = Player::with_faction_str("Bruno", "Cygnar");
    candidate.team = Some(String::new());
    assert_eq!(pairing_penalty(&anchor, &candidate), 0);
}

#[test]
fn anchor_avoids_rematch_inside_a_group() {
    let players: Vec<Player> = ["Anna", "Bruno", "Carla", "Dara"]
        .iter()
        .enumerate()
        .map(|(i, name)| Player::with_faction_str(*name, &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let mut t = Tournament::with_players(players, 2, 50).unwrap();

    // Anna and Bruno met in round 1
    t.player_mut(ids[0]).unwrap().history.push(played(
        ids[1],
        1,
        GameScore::new(3, 0, 0),
        "F1",
    ));
    t.player_mut(ids[1]).unwrap().history.push(played(
        ids[0],
        1,
        GameScore::new(0, 0, 0),
        "F0",
    ));

    let pairs = match_groups(&t, vec![ids.clone()]).unwrap();
    assert_eq!(pairs, vec![(ids[0], ids[2]), (ids[1], ids[3])]);
}

#[test]
fn ties_pick_the_earliest_candidate() {
    let players: Vec<Player> = (0..4)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let t = Tournament::with_players(players, 2, 50).unwrap();

    // all penalties are zero, so matching walks the group front to back
    let pairs = match_groups(&t, vec![ids.clone()]).unwrap();
    assert_eq!(pairs, vec![(ids[0], ids[1]), (ids[2], ids[3])]);
}

#[test]
fn teammates_are_split_when_possible() {
    let mut players: Vec<Player> = (0..4)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    players[0].team = Some("Bears".to_owned());
    players[1].team = Some("Bears".to_owned());
    players[2].team = Some("Wolves".to_owned());
    players[3].team = Some("Wolves".to_owned());
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let t = Tournament::with_players(players, 2, 50).unwrap();

    let pairs = match_groups(&t, vec![ids.clone()]).unwrap();
    assert_eq!(pairs, vec![(ids[0], ids[2]), (ids[1], ids[3])]);
}

#[test]
fn groups_split_where_tournament_points_change() {
    let players: Vec<Player> = (0..4)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let mut t = Tournament::with_players(players, 2, 50).unwrap();

    // P0 beat P1 at table 1, P2 beat P3 at table 2
    t.player_mut(ids[0]).unwrap().history.push(played(ids[1], 1, GameScore::new(3, 5, 20), "F1"));
    t.player_mut(ids[1]).unwrap().history.push(played(ids[0], 1, GameScore::new(0, 2, 10), "F0"));
    t.player_mut(ids[2]).unwrap().history.push(played(ids[3], 2, GameScore::new(3, 5, 20), "F3"));
    t.player_mut(ids[3]).unwrap().history.push(played(ids[2], 2, GameScore::new(0, 2, 10), "F2"));
    t.current_round = 0;

    let groups = pairing_groups(&t, &mut StdRng::seed_from_u64(1));
    assert_eq!(groups, vec![vec![ids[0], ids[2]], vec![ids[1], ids[3]]]);
}

#[test]
fn first_round_is_one_shuffled_group() {
    let players: Vec<Player> = (0..6)
        .map(|i| Player::with_faction_str(format!("P{i}"), "Khador"))
        .collect();
    let ids: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    let t = Tournament::with_players(players, 3, 50).unwrap();

    let groups = pairing_groups(&t, &mut StdRng::seed_from_u64(2));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].iter().copied().collect::<HashSet<_>>(), ids);

    let again = pairing_groups(&t, &mut StdRng::seed_from_u64(2));
    assert_eq!(groups, again);
}

#[test]
fn strength_of_schedule_breaks_point_ties() {
    let players: Vec<Player> = (0..4)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let mut t = Tournament::with_players(players, 2, 50).unwrap();

    // P0 beat P1 who salvaged a point; P2 beat P3 who got nothing.
    // P0 and P2 tie on 3 tp, but P0 faced the stronger opponent.
    t.player_mut(ids[0]).unwrap().history.push(played(ids[1], 1, GameScore::new(3, 5, 20), "F1"));
    t.player_mut(ids[1]).unwrap().history.push(played(ids[0], 1, GameScore::new(1, 2, 10), "F0"));
    t.player_mut(ids[2]).unwrap().history.push(played(ids[3], 2, GameScore::new(3, 5, 20), "F3"));
    t.player_mut(ids[3]).unwrap().history.push(played(ids[2], 2, GameScore::new(0, 2, 10), "F2"));

    let ranked = ranked_players(&t);
    assert_eq!(ranked[0].id, ids[0]);
    assert_eq!(ranked[1].id, ids[2]);

    let rows = standings(&t);
    assert_eq!(rows[0].strength_of_schedule, 1);
    assert_eq!(rows[1].strength_of_schedule, 0);
    assert_eq!(rows[0].tournament_points, 3);
    assert_eq!(rows[3].tournament_points, 0);
}

#[test]
fn odd_middle_group_pulls_the_next_tiers_head() {
    let players: Vec<Player> = (0..6)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let t = Tournament::with_players(players, 3, 50).unwrap();

    let mut groups = vec![
        vec![ids[0], ids[1], ids[2]],
        vec![ids[3], ids[4], ids[5]],
    ];
    let bye = resolve_odd_groups(&t, &mut groups, &mut StdRng::seed_from_u64(3));

    // the top group borrowed P3, leaving the last group even: no bye
    assert!(bye.is_none());
    assert_eq!(groups[0], vec![ids[0], ids[1], ids[2], ids[3]]);
    assert_eq!(groups[1], vec![ids[4], ids[5]]);
}

#[test]
fn odd_last_group_yields_a_bye_from_that_group() {
    let players: Vec<Player> = (0..5)
        .map(|i| Player::with_faction_str(format!("P{i}"), &format!("F{i}")))
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let t = Tournament::with_players(players, 3, 50).unwrap();

    let mut groups = vec![vec![ids[0], ids[1]], vec![ids[2], ids[3], ids[4]]];
    let bye = resolve_odd_groups(&t, &mut groups, &mut StdRng::seed_from_u64(4));

    let bye = bye.expect("odd last group must yield a bye");
    assert!(ids[2..].contains(&bye));
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].len(), 2);
    assert!(!groups[1].contains(&bye));
}
