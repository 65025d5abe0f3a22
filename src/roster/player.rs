// Roster record types: players, counting stats, season metadata.

use serde::{Deserialize, Serialize};

/// Counting statistics that accumulate monotonically over a season.
///
/// All fields are non-negative integers. Stored player documents use
/// camelCase keys, matching the document shape the store persists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattingStats {
    pub games: u32,
    pub plate_appearances: u32,
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
    // Defensive
    pub put_outs: u32,
    pub assists: u32,
}

impl BattingStats {
    /// Times on base: hits + walks + hit-by-pitch.
    pub fn times_on_base(&self) -> u32 {
        self.hits + self.walks + self.hit_by_pitch
    }

    /// The OBP denominator (AB + BB + HBP). Also used as the plate-appearance
    /// figure for trophy eligibility; the stored `plate_appearances` counter
    /// is display-only and may lag behind.
    pub fn obp_denominator(&self) -> u32 {
        self.at_bats + self.walks + self.hit_by_pitch
    }

    /// Whether any of the nine core batting counters is non-zero.
    ///
    /// Defensive stats (put-outs, assists) deliberately do not count: the
    /// roster page switches from alphabetical to average-ranked ordering only
    /// once real batting lines have been recorded.
    pub fn any_batting_recorded(&self) -> bool {
        self.at_bats != 0
            || self.hits != 0
            || self.doubles != 0
            || self.triples != 0
            || self.home_runs != 0
            || self.runs != 0
            || self.rbi != 0
            || self.walks != 0
            || self.hit_by_pitch != 0
    }
}

/// One roster entry for a season.
///
/// Players are immutable value snapshots from the computation layer's point
/// of view; only the store mutates the underlying documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique, stable identifier. Assigned at roster-build time and never
    /// reused within a season after deletion.
    pub id: String,
    /// Non-empty display name.
    pub name: String,
    /// Jersey number. Not required to be unique.
    pub number: u32,
    /// Short position code, e.g. "SS" or "CF".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_pos: Option<String>,
    pub stats: BattingStats,
}

impl Player {
    /// The sort key used for pre-season alphabetical ordering: the final
    /// whitespace-delimited token of the name, lowercased.
    pub fn last_name_key(&self) -> String {
        self.name
            .split_whitespace()
            .last()
            .unwrap_or("")
            .to_lowercase()
    }
}

/// Season win/loss/tie record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
}

/// Per-season metadata shown in the report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMeta {
    pub team_name: String,
    pub season_label: String,
    /// League division name (Pinto, Mustang, Bronco, Pony, Colt).
    pub league: String,
    pub record: TeamRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_named(name: &str) -> Player {
        Player {
            id: "p01".into(),
            name: name.into(),
            number: 7,
            primary_pos: None,
            stats: BattingStats::default(),
        }
    }

    #[test]
    fn last_name_key_takes_final_token() {
        assert_eq!(player_named("Amy Adams").last_name_key(), "adams");
        assert_eq!(player_named("Jo Ann Van Dyke").last_name_key(), "dyke");
        assert_eq!(player_named("Cher").last_name_key(), "cher");
    }

    #[test]
    fn last_name_key_is_case_insensitive() {
        assert_eq!(player_named("Zed YOUNG").last_name_key(), "young");
    }

    #[test]
    fn obp_denominator_sums_ab_bb_hbp() {
        let s = BattingStats {
            at_bats: 10,
            walks: 3,
            hit_by_pitch: 2,
            ..Default::default()
        };
        assert_eq!(s.obp_denominator(), 15);
        assert_eq!(s.times_on_base(), 5);
    }

    #[test]
    fn any_batting_recorded_ignores_defense() {
        let mut s = BattingStats::default();
        assert!(!s.any_batting_recorded());

        s.put_outs = 4;
        s.assists = 2;
        assert!(!s.any_batting_recorded(), "defense alone should not count");

        s.hit_by_pitch = 1;
        assert!(s.any_batting_recorded());
    }

    #[test]
    fn player_document_round_trip_uses_camel_case() {
        let p = Player {
            id: "p03".into(),
            name: "Luke Bauer".into(),
            number: 3,
            primary_pos: Some("2B".into()),
            stats: BattingStats {
                at_bats: 12,
                hits: 5,
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["stats"]["atBats"], 12);
        assert_eq!(json["primaryPos"], "2B");

        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back.stats.hits, 5);
        assert_eq!(back.primary_pos.as_deref(), Some("2B"));
    }
}
