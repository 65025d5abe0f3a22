// Per-game entry: result, score, and per-player stat deltas.
//
// A game is entered as a TOML file and applied to the store in one
// transaction: the game and its line documents are inserted, each player's
// counting stats are incremented, and the season record ticks up.
//
// Example game file:
//
// ```toml
// date = "2026-04-18"
// opponent = "River City Rockets"
// result = "W"
// score_us = 7
// score_them = 4
//
// [lines.p01]
// at_bats = 3
// hits = 2
// doubles = 1
// runs = 1
// ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::roster::player::BattingStats;

/// Game outcome from our side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

/// Non-negative per-player deltas for one game. Every field defaults to 0,
/// so a game file only lists what happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDelta {
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub hit_by_pitch: u32,
    pub put_outs: u32,
    pub assists: u32,
}

impl LineDelta {
    /// A line with nothing in it is skipped when the game is applied.
    pub fn is_zero(&self) -> bool {
        *self == LineDelta::default()
    }

    /// Add this delta onto an accumulated stat line. Applying a non-zero
    /// line also counts one game played and derives the plate-appearance
    /// increment (AB + BB + HBP).
    pub fn apply_to(&self, stats: &mut BattingStats) {
        stats.games += 1;
        stats.plate_appearances += self.at_bats + self.walks + self.hit_by_pitch;
        stats.at_bats += self.at_bats;
        stats.hits += self.hits;
        stats.doubles += self.doubles;
        stats.triples += self.triples;
        stats.home_runs += self.home_runs;
        stats.runs += self.runs;
        stats.rbi += self.rbi;
        stats.walks += self.walks;
        stats.strikeouts += self.strikeouts;
        stats.hit_by_pitch += self.hit_by_pitch;
        stats.put_outs += self.put_outs;
        stats.assists += self.assists;
    }
}

/// One game's worth of input: metadata plus per-player lines keyed by
/// player id. A BTreeMap keeps line application order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    pub date: NaiveDate,
    pub opponent: String,
    pub result: GameResult,
    #[serde(default)]
    pub score_us: u32,
    #[serde(default)]
    pub score_them: u32,
    #[serde(default)]
    pub lines: BTreeMap<String, LineDelta>,
}

impl GameEntry {
    /// Whether at least one line carries a non-zero delta.
    pub fn any_nonzero_line(&self) -> bool {
        self.lines.values().any(|l| !l.is_zero())
    }

    /// Stable id prefix for the stored game document: `YYYYMMDD-opponent`
    /// with the opponent slugified. The store appends a uniquifier so two
    /// games against the same opponent on one day don't collide.
    pub fn id_stem(&self) -> String {
        format!("{}-{}", self.date.format("%Y%m%d"), slugify(&self.opponent))
    }
}

/// Lowercase, alphanumeric-and-dash slug of an opponent name.
fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true; // suppress a leading dash
    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if ch == '\'' || ch == '"' {
            // Apostrophes vanish rather than becoming dashes.
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Parse a game entry from a TOML file.
pub fn load_game_toml(path: &Path) -> anyhow::Result<GameEntry> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read game file {}", path.display()))?;
    let entry: GameEntry = toml::from_str(&text)
        .with_context(|| format!("failed to parse game file {}", path.display()))?;

    if entry.opponent.trim().is_empty() {
        anyhow::bail!("game file {} has no opponent", path.display());
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("River City Rockets"), "river-city-rockets");
        assert_eq!(slugify("O'Brien's  Owls!"), "obriens-owls");
        assert_eq!(slugify("  The--Yard Apes "), "the-yard-apes");
    }

    #[test]
    fn id_stem_combines_date_and_slug() {
        let entry = GameEntry {
            date: NaiveDate::from_ymd_opt(2026, 4, 18).unwrap(),
            opponent: "River City Rockets".into(),
            result: GameResult::Win,
            score_us: 7,
            score_them: 4,
            lines: BTreeMap::new(),
        };
        assert_eq!(entry.id_stem(), "20260418-river-city-rockets");
    }

    #[test]
    fn delta_apply_accumulates_and_counts_a_game() {
        let mut stats = BattingStats {
            games: 2,
            plate_appearances: 8,
            at_bats: 7,
            hits: 3,
            walks: 1,
            ..Default::default()
        };
        let delta = LineDelta {
            at_bats: 3,
            hits: 2,
            doubles: 1,
            walks: 1,
            hit_by_pitch: 1,
            ..Default::default()
        };
        delta.apply_to(&mut stats);

        assert_eq!(stats.games, 3);
        assert_eq!(stats.at_bats, 10);
        assert_eq!(stats.hits, 5);
        assert_eq!(stats.doubles, 1);
        assert_eq!(stats.walks, 2);
        assert_eq!(stats.hit_by_pitch, 1);
        assert_eq!(stats.plate_appearances, 13, "PA derives from AB+BB+HBP");
    }

    #[test]
    fn zero_line_detection() {
        assert!(LineDelta::default().is_zero());
        let line = LineDelta {
            put_outs: 1,
            ..Default::default()
        };
        assert!(!line.is_zero());
    }

    #[test]
    fn toml_round_trip() {
        let text = r#"
date = "2026-04-18"
opponent = "River City Rockets"
result = "W"
score_us = 7
score_them = 4

[lines.p01]
at_bats = 3
hits = 2
doubles = 1
runs = 1

[lines.p02]
walks = 2
"#;
        let entry: GameEntry = toml::from_str(text).unwrap();
        assert_eq!(entry.result, GameResult::Win);
        assert_eq!(entry.lines.len(), 2);
        assert_eq!(entry.lines["p01"].hits, 2);
        assert_eq!(entry.lines["p02"].walks, 2);
        assert!(entry.any_nonzero_line());
    }

    #[test]
    fn all_zero_lines_are_detected() {
        let mut lines = BTreeMap::new();
        lines.insert("p01".to_string(), LineDelta::default());
        let entry = GameEntry {
            date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            opponent: "Hawks".into(),
            result: GameResult::Loss,
            score_us: 1,
            score_them: 9,
            lines,
        };
        assert!(!entry.any_nonzero_line());
    }
}
