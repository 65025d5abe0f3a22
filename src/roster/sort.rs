// Display ordering for the roster list.
//
// Before any batting stats exist the roster reads like a lineup card:
// alphabetical by last name. Once stats are in, it becomes a leaderboard
// sorted by batting average. Both orderings are total and deterministic;
// the final full-name comparison leaves no equal elements.

use crate::roster::player::Player;
use crate::stats;

/// Whether any player has a non-zero core batting counter.
pub fn any_stats_exist(players: &[Player]) -> bool {
    players.iter().any(|p| p.stats.any_batting_recorded())
}

/// Sort the roster in place for display.
///
/// Pre-season: last name (case-insensitive) ascending, then full name.
/// In-season: batting average descending, ties broken by hits, then RBI,
/// then full name ascending.
pub fn sort_for_display(players: &mut [Player]) {
    if !any_stats_exist(players) {
        players.sort_by(|a, b| {
            a.last_name_key()
                .cmp(&b.last_name_key())
                .then_with(|| a.name.cmp(&b.name))
        });
        return;
    }

    players.sort_by(|a, b| {
        stats::batting_average(b)
            .total_cmp(&stats::batting_average(a))
            .then_with(|| b.stats.hits.cmp(&a.stats.hits))
            .then_with(|| b.stats.rbi.cmp(&a.stats.rbi))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Convenience wrapper returning a freshly ordered copy.
pub fn sorted_for_display(players: &[Player]) -> Vec<Player> {
    let mut list = players.to_vec();
    sort_for_display(&mut list);
    list
}
