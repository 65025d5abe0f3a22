// Per-statistic leader computation.
//
// For each tracked statistic, the leader set is every eligible player tied
// for the maximum value. Rate stats group ties within an absolute epsilon
// (floating-point rounding at 3-decimal display precision); counting stats
// require exact equality. A maximum of zero never produces leaders, so an
// all-zero roster shows nobody as a leader before any games are played.

use std::collections::HashMap;

use crate::roster::player::Player;
use crate::stats;

/// Absolute tolerance for rate-stat tie grouping.
pub const RATE_EPSILON: f64 = 0.0005;

/// The statistics tracked on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Avg,
    Obp,
    Slg,
    Ops,
    Hits,
    AtBats,
    Rbi,
    Runs,
}

impl StatKey {
    pub const ALL: [StatKey; 8] = [
        StatKey::Avg,
        StatKey::Obp,
        StatKey::Slg,
        StatKey::Ops,
        StatKey::Hits,
        StatKey::AtBats,
        StatKey::Rbi,
        StatKey::Runs,
    ];

    /// Rate stats (computed from a denominator) versus raw counting stats.
    pub fn is_rate(self) -> bool {
        matches!(
            self,
            StatKey::Avg | StatKey::Obp | StatKey::Slg | StatKey::Ops
        )
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            StatKey::Avg => "AVG",
            StatKey::Obp => "OBP",
            StatKey::Slg => "SLG",
            StatKey::Ops => "OPS",
            StatKey::Hits => "H",
            StatKey::AtBats => "AB",
            StatKey::Rbi => "RBI",
            StatKey::Runs => "R",
        }
    }

    fn value(self, p: &Player) -> f64 {
        match self {
            StatKey::Avg => stats::batting_average(p),
            StatKey::Obp => stats::on_base_percentage(p),
            StatKey::Slg => stats::slugging(p),
            StatKey::Ops => stats::ops(p),
            StatKey::Hits => p.stats.hits as f64,
            StatKey::AtBats => p.stats.at_bats as f64,
            StatKey::Rbi => p.stats.rbi as f64,
            StatKey::Runs => p.stats.runs as f64,
        }
    }

    /// Rate-stat eligibility: the denominator must be live. Counting stats
    /// are always eligible.
    fn eligible(self, p: &Player) -> bool {
        match self {
            StatKey::Avg | StatKey::Slg | StatKey::Ops => p.stats.at_bats > 0,
            StatKey::Obp => p.stats.obp_denominator() > 0,
            _ => true,
        }
    }
}

/// Map from statistic to the player ids tied for the lead (possibly empty).
pub type LeadersMap = HashMap<StatKey, Vec<String>>;

/// Compute the leader set for every tracked statistic.
///
/// Pure function of the player list; recomputed on every call.
pub fn compute_leaders(players: &[Player]) -> LeadersMap {
    let mut out = LeadersMap::with_capacity(StatKey::ALL.len());

    for key in StatKey::ALL {
        out.insert(key, leaders_for(key, players));
    }

    out
}

fn leaders_for(key: StatKey, players: &[Player]) -> Vec<String> {
    let eligible: Vec<&Player> = players.iter().filter(|p| key.eligible(*p)).collect();

    let max = eligible
        .iter()
        .map(|p| key.value(p))
        .fold(f64::NEG_INFINITY, f64::max);

    // Nobody eligible, or a max of zero: no leaders.
    if !max.is_finite() || max <= 0.0 {
        return Vec::new();
    }

    let eps = if key.is_rate() { RATE_EPSILON } else { 0.0 };

    eligible
        .iter()
        .filter(|p| {
            let v = key.value(p);
            if eps > 0.0 {
                (v - max).abs() <= eps
            } else {
                v == max
            }
        })
        .map(|p| p.id.clone())
        .collect()
}
