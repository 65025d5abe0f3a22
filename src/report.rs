// Plain-text report rendering: roster table, leaderboard, trophy case.
//
// Pure functions from already-computed data to strings; nothing here touches
// the store. Leader markers (`*`) on the roster table come from the same
// leader sets the leaderboard prints, so the two views can never disagree.

use crate::leaders::{LeadersMap, StatKey};
use crate::roster::player::{Player, SeasonMeta};
use crate::stats;
use crate::trophies::TrophyAward;

/// Report header: team, season, league, record.
pub fn render_header(meta: &SeasonMeta) -> String {
    format!(
        "{} -- {} ({})  {}-{}-{}\n",
        meta.team_name,
        meta.season_label,
        meta.league,
        meta.record.wins,
        meta.record.losses,
        meta.record.ties
    )
}

/// Roster table in display order. Rate columns carry a `*` when the player
/// is tied for the lead in that statistic.
pub fn render_roster(meta: &SeasonMeta, players: &[Player], leaders: &LeadersMap) -> String {
    let mut out = render_header(meta);
    out.push('\n');

    if players.is_empty() {
        out.push_str("(no players on the roster)\n");
        return out;
    }

    out.push_str(&format!(
        "{:<3} {:<22} {:<4} {:>3} {:>4} {:>4} {:>6} {:>6} {:>6} {:>6} {:>4} {:>4}\n",
        "#", "NAME", "POS", "GP", "AB", "H", "AVG", "OBP", "SLG", "OPS", "RBI", "R"
    ));

    for p in players {
        let marked = |key: StatKey, value: String| -> String {
            if leads(leaders, key, p) {
                format!("{value}*")
            } else {
                value
            }
        };

        out.push_str(&format!(
            "{:<3} {:<22} {:<4} {:>3} {:>4} {:>4} {:>6} {:>6} {:>6} {:>6} {:>4} {:>4}\n",
            p.number,
            p.name,
            p.primary_pos.as_deref().unwrap_or("-"),
            p.stats.games,
            marked(StatKey::AtBats, p.stats.at_bats.to_string()),
            marked(StatKey::Hits, p.stats.hits.to_string()),
            marked(StatKey::Avg, stats::fmt3(stats::batting_average(p))),
            marked(StatKey::Obp, stats::fmt3(stats::on_base_percentage(p))),
            marked(StatKey::Slg, stats::fmt3(stats::slugging(p))),
            marked(StatKey::Ops, stats::fmt3(stats::ops(p))),
            marked(StatKey::Rbi, p.stats.rbi.to_string()),
            marked(StatKey::Runs, p.stats.runs.to_string()),
        ));
    }

    out
}

/// One line per tracked statistic: the leading value and everyone tied for it.
pub fn render_leaders(players: &[Player], leaders: &LeadersMap) -> String {
    let mut out = String::from("TEAM LEADERS\n\n");

    for key in StatKey::ALL {
        let ids = leaders.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let line = if ids.is_empty() {
            "--".to_string()
        } else {
            let names: Vec<&str> = ids
                .iter()
                .filter_map(|id| players.iter().find(|p| &p.id == id))
                .map(|p| p.name.as_str())
                .collect();
            let value = leading_value(key, players, ids);
            format!("{value:>6}  {}", names.join(", "))
        };
        out.push_str(&format!("{:<4} {line}\n", key.label()));
    }

    out
}

/// Display value for a leader line: the first leader's stat, formatted.
fn leading_value(key: StatKey, players: &[Player], ids: &[String]) -> String {
    let Some(p) = ids.first().and_then(|id| players.iter().find(|p| &p.id == id)) else {
        return "--".to_string();
    };
    match key {
        StatKey::Avg => stats::fmt3(stats::batting_average(p)),
        StatKey::Obp => stats::fmt3(stats::on_base_percentage(p)),
        StatKey::Slg => stats::fmt3(stats::slugging(p)),
        StatKey::Ops => stats::fmt3(stats::ops(p)),
        StatKey::Hits => p.stats.hits.to_string(),
        StatKey::AtBats => p.stats.at_bats.to_string(),
        StatKey::Rbi => p.stats.rbi.to_string(),
        StatKey::Runs => p.stats.runs.to_string(),
    }
}

/// Trophy case: one block per awarded trophy, in catalog priority order.
pub fn render_trophies(awards: &[TrophyAward]) -> String {
    if awards.is_empty() {
        return "TROPHY CASE\n\n(no awards yet)\n".to_string();
    }

    let mut out = String::from("TROPHY CASE\n");
    for award in awards {
        out.push('\n');
        out.push_str(&format!(
            "{} -- {}\n",
            award.trophy.title, award.trophy.subtitle
        ));
        out.push_str(&format!(
            "  Winner: {} ({})  {}\n",
            award.winner.name, award.value_label, award.value_sub
        ));
        if let Some(ru) = &award.runner_up {
            out.push_str(&format!("  Runner-up: {}\n", ru.name));
        }
    }
    out
}

fn leads(leaders: &LeadersMap, key: StatKey, p: &Player) -> bool {
    leaders
        .get(&key)
        .is_some_and(|ids| ids.iter().any(|id| id == &p.id))
}
