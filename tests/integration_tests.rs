// End-to-end tests: seed or rebuild a roster in an in-memory store, apply
// games, then run the full reporting pipeline (sort, leaders, trophies).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use dugout::game::{GameEntry, GameResult, LineDelta};
use dugout::leaders::{self, StatKey};
use dugout::report;
use dugout::roster::import::DraftRow;
use dugout::roster::player::{SeasonMeta, TeamRecord};
use dugout::roster::sort;
use dugout::store::Store;
use dugout::trophies::{self, TrophyKey};

const SEASON: &str = "tigers-2026";

fn store_with_demo_roster() -> Store {
    let store = Store::open(":memory:").expect("in-memory store");
    store.seed_demo_roster(SEASON).expect("seed");
    store
}

fn fallback_meta() -> SeasonMeta {
    SeasonMeta {
        team_name: "Tigers".into(),
        season_label: "Spring 2026".into(),
        league: "Mustang".into(),
        record: TeamRecord::default(),
    }
}

fn game(date: (i32, u32, u32), opponent: &str, result: GameResult) -> GameEntry {
    GameEntry {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        opponent: opponent.into(),
        result,
        score_us: 0,
        score_them: 0,
        lines: BTreeMap::new(),
    }
}

fn line(at_bats: u32, hits: u32) -> LineDelta {
    LineDelta {
        at_bats,
        hits,
        ..Default::default()
    }
}

#[test]
fn fresh_roster_sorts_alphabetically_and_has_no_leaders() {
    let store = store_with_demo_roster();
    let players = sort::sorted_for_display(&store.load_players(SEASON).unwrap());

    assert_eq!(players.len(), 12);
    // Pre-stats ordering is by last name.
    let last_names: Vec<String> = players.iter().map(|p| p.last_name_key()).collect();
    let mut sorted = last_names.clone();
    sorted.sort();
    assert_eq!(last_names, sorted);

    let leaders = leaders::compute_leaders(&players);
    for key in StatKey::ALL {
        assert!(leaders[&key].is_empty(), "{:?} has no leader yet", key);
    }
}

#[test]
fn applying_games_flows_through_to_reports() {
    let store = store_with_demo_roster();
    let players = store.load_players(SEASON).unwrap();
    let star = players[0].id.clone();
    let other = players[1].id.clone();

    let mut g1 = game((2026, 4, 18), "River City Rockets", GameResult::Win);
    g1.lines.insert(star.clone(), line(3, 3));
    g1.lines.insert(other.clone(), line(3, 1));
    store.apply_game(SEASON, &g1).unwrap();

    let mut g2 = game((2026, 4, 25), "Hawks", GameResult::Loss);
    g2.lines.insert(star.clone(), line(4, 2));
    g2.lines.insert(other.clone(), line(2, 1));
    store.apply_game(SEASON, &g2).unwrap();

    // Record: 1-1-0.
    let meta = store.load_meta(SEASON, &fallback_meta()).unwrap();
    assert_eq!(meta.record.wins, 1);
    assert_eq!(meta.record.losses, 1);

    // The star (5/7) leads AVG and hits; roster now sorts by average.
    let players = sort::sorted_for_display(&store.load_players(SEASON).unwrap());
    assert_eq!(players[0].id, star);

    let leaders = leaders::compute_leaders(&players);
    assert_eq!(leaders[&StatKey::Avg], vec![star.clone()]);
    assert_eq!(leaders[&StatKey::Hits], vec![star.clone()]);

    // Reports render and carry the key numbers.
    let roster_out = report::render_roster(&meta, &players, &leaders);
    assert!(roster_out.contains("1-1-0"));
    assert!(roster_out.contains(".714*"), "star AVG starred:\n{roster_out}");

    let leaders_out = report::render_leaders(&players, &leaders);
    assert!(leaders_out.contains(".714"));
}

#[test]
fn trophy_case_on_a_played_season() {
    let store = store_with_demo_roster();
    let ids: Vec<String> = store
        .load_players(SEASON)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    // Four games; everyone bats, the first player hits everything.
    for (i, opponent) in ["Rockets", "Hawks", "Owls", "Bears"].iter().enumerate() {
        let mut g = game((2026, 5, 1 + i as u32), opponent, GameResult::Win);
        for (j, id) in ids.iter().enumerate() {
            let hits = if j == 0 { 3 } else { 1 };
            g.lines.insert(id.clone(), line(3, hits));
        }
        store.apply_game(SEASON, &g).unwrap();
    }

    let players = store.load_players(SEASON).unwrap();
    let awards = trophies::compute_trophies(&players);

    // 12 players, 12 trophies, all allocated, all distinct.
    assert_eq!(awards.len(), 12);
    let winners: std::collections::HashSet<&str> =
        awards.iter().map(|a| a.winner.id.as_str()).collect();
    assert_eq!(winners.len(), 12);

    // The 1.000 hitter takes the marquee trophy.
    let champ = awards
        .iter()
        .find(|a| a.trophy.key == TrophyKey::BattingChamp)
        .unwrap();
    assert_eq!(champ.winner.id, ids[0]);
    assert_eq!(champ.value_label, "1.000");

    let out = report::render_trophies(&awards);
    assert!(out.contains("Batting Champ"));
    assert!(out.contains("Winner:"));
}

#[test]
fn rebuild_mid_season_starts_over() {
    let store = store_with_demo_roster();
    let first_id = store.load_players(SEASON).unwrap()[0].id.clone();

    let mut g = game((2026, 4, 18), "Rockets", GameResult::Win);
    g.lines.insert(first_id.clone(), line(3, 2));
    store.apply_game(SEASON, &g).unwrap();

    let rows = vec![
        DraftRow {
            name: "Amy Adams".into(),
            number: 1,
            primary_pos: Some("C".into()),
        },
        DraftRow {
            name: "Zed Young".into(),
            number: 2,
            primary_pos: None,
        },
    ];
    store.rebuild_roster(SEASON, &rows).unwrap();

    let players = store.load_players(SEASON).unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p.stats.games == 0));
    assert!(
        players.iter().all(|p| p.id != first_id),
        "old ids are never reused"
    );

    let meta = store.load_meta(SEASON, &fallback_meta()).unwrap();
    assert_eq!(meta.record, TeamRecord::default());

    // A line keyed by the retired id no longer matches anyone.
    let mut stale = game((2026, 4, 25), "Hawks", GameResult::Win);
    stale.lines.insert(first_id, line(2, 1));
    assert!(store.apply_game(SEASON, &stale).is_err());
}

#[test]
fn seasons_are_isolated() {
    let store = Store::open(":memory:").unwrap();
    store.seed_demo_roster("tigers-2026").unwrap();
    store
        .rebuild_roster(
            "tigers-fall-2026",
            &[DraftRow {
                name: "Solo Player".into(),
                number: 1,
                primary_pos: None,
            }],
        )
        .unwrap();

    assert_eq!(store.load_players("tigers-2026").unwrap().len(), 12);
    assert_eq!(store.load_players("tigers-fall-2026").unwrap().len(), 1);

    // An unset season resolves to whatever fallback the config supplies.
    assert_eq!(
        store.current_season_id("tigers-2026").unwrap(),
        "tigers-2026"
    );
    store.set_current_season_id("tigers-fall-2026").unwrap();
    assert_eq!(
        store.current_season_id("tigers-2026").unwrap(),
        "tigers-fall-2026"
    );
}
