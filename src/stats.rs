// Derived rate statistics for a single player.
//
// Every function here is total over well-formed (non-negative integer) stat
// lines: division-by-zero is guarded by returning 0 rather than NaN/Infinity.
// A player with zero at-bats is not "batting .000 meaningfully" -- callers
// that need eligibility must check the denominator separately.

use crate::roster::player::Player;

/// Batting average: hits / at-bats. Returns 0 when at-bats is 0.
pub fn batting_average(p: &Player) -> f64 {
    let ab = p.stats.at_bats;
    if ab == 0 {
        return 0.0;
    }
    p.stats.hits as f64 / ab as f64
}

/// On-base percentage: (H + BB + HBP) / (AB + BB + HBP).
/// Returns 0 when the denominator is 0.
pub fn on_base_percentage(p: &Player) -> f64 {
    let denom = p.stats.obp_denominator();
    if denom == 0 {
        return 0.0;
    }
    p.stats.times_on_base() as f64 / denom as f64
}

/// Slugging percentage: total bases / at-bats. Returns 0 when at-bats is 0.
///
/// Singles are derived as `hits - doubles - triples - homeRuns`, clamped at
/// zero so malformed input (extra-base hits exceeding total hits) can never
/// produce a negative total-bases figure. The normalization boundary logs a
/// warning when it sees such a line; here we stay total and just clamp.
pub fn slugging(p: &Player) -> f64 {
    let s = &p.stats;
    if s.at_bats == 0 {
        return 0.0;
    }

    let singles = s.hits.saturating_sub(s.doubles + s.triples + s.home_runs);
    let total_bases = singles + s.doubles * 2 + s.triples * 3 + s.home_runs * 4;

    total_bases as f64 / s.at_bats as f64
}

/// On-base plus slugging.
pub fn ops(p: &Player) -> f64 {
    on_base_percentage(p) + slugging(p)
}

/// Format a rate stat to three decimals, baseball style: a leading zero
/// before the decimal point is stripped (".321"), values of 1.000 or more
/// keep their integer part ("1.050").
pub fn fmt3(n: f64) -> String {
    let s = format!("{n:.3}");
    match s.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::{BattingStats, Player};

    fn player_with(stats: BattingStats) -> Player {
        Player {
            id: "p01".into(),
            name: "Test Player".into(),
            number: 1,
            primary_pos: None,
            stats,
        }
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn zero_at_bats_rates_are_zero() {
        let p = player_with(BattingStats::default());
        assert!(approx_eq(batting_average(&p), 0.0));
        assert!(approx_eq(slugging(&p), 0.0));
        assert!(approx_eq(on_base_percentage(&p), 0.0));
        assert!(approx_eq(ops(&p), 0.0));
    }

    #[test]
    fn obp_counts_walks_with_zero_at_bats() {
        // AB = 0 but BB > 0: OBP has a live denominator.
        let p = player_with(BattingStats {
            walks: 3,
            ..Default::default()
        });
        assert!(approx_eq(on_base_percentage(&p), 1.0));
    }

    #[test]
    fn batting_average_known_value() {
        let p = player_with(BattingStats {
            at_bats: 10,
            hits: 3,
            ..Default::default()
        });
        assert!(approx_eq(batting_average(&p), 0.3));
    }

    #[test]
    fn slugging_known_scenario() {
        // 3 H (1 double, 1 HR) in 10 AB: singles = 1, TB = 1 + 2 + 4 = 7.
        let p = player_with(BattingStats {
            at_bats: 10,
            hits: 3,
            doubles: 1,
            home_runs: 1,
            ..Default::default()
        });
        assert!(approx_eq(slugging(&p), 0.7));
    }

    #[test]
    fn slugging_clamps_malformed_extra_base_hits() {
        // 2 H but 3 HR recorded: singles clamp to 0 instead of going negative.
        let p = player_with(BattingStats {
            at_bats: 10,
            hits: 2,
            home_runs: 3,
            ..Default::default()
        });
        assert!(approx_eq(slugging(&p), 1.2));
    }

    #[test]
    fn ops_is_sum_of_obp_and_slg() {
        let p = player_with(BattingStats {
            at_bats: 20,
            hits: 8,
            doubles: 2,
            triples: 1,
            walks: 4,
            hit_by_pitch: 1,
            ..Default::default()
        });
        let expected = on_base_percentage(&p) + slugging(&p);
        assert!(approx_eq(ops(&p), expected));
    }

    #[test]
    fn fmt3_strips_leading_zero_only() {
        assert_eq!(fmt3(0.321), ".321");
        assert_eq!(fmt3(1.05), "1.050");
        assert_eq!(fmt3(0.0), ".000");
        assert_eq!(fmt3(0.7), ".700");
    }
}
