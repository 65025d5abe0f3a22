// Normalization boundary between stored documents and the typed roster.
//
// The store persists players and season metadata as JSON documents, and
// documents written by older app versions (or edited by hand) may be missing
// fields or carry the wrong types. Every function here is total: missing or
// malformed numeric fields default to 0, strings are trimmed, and only a
// record with no usable name is dropped. The pure computation layer never
// sees anything but well-typed values.

use serde_json::Value;
use tracing::warn;

use crate::roster::player::{BattingStats, Player, SeasonMeta, TeamRecord};

/// Non-negative integer from an arbitrary JSON value; 0 for anything else.
fn as_u32(v: Option<&Value>) -> u32 {
    match v.and_then(Value::as_f64) {
        Some(n) if n.is_finite() && n > 0.0 => n.floor() as u32,
        _ => 0,
    }
}

/// Trimmed non-empty string, or None.
fn as_nonempty_string(v: Option<&Value>) -> Option<String> {
    let s = v?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Build a stat line from a (possibly absent) `stats` object.
pub fn normalize_stats(v: Option<&Value>) -> BattingStats {
    let get = |key: &str| v.and_then(|d| d.get(key));

    BattingStats {
        games: as_u32(get("games")),
        plate_appearances: as_u32(get("plateAppearances")),
        at_bats: as_u32(get("atBats")),
        hits: as_u32(get("hits")),
        doubles: as_u32(get("doubles")),
        triples: as_u32(get("triples")),
        home_runs: as_u32(get("homeRuns")),
        runs: as_u32(get("runs")),
        rbi: as_u32(get("rbi")),
        walks: as_u32(get("walks")),
        strikeouts: as_u32(get("strikeouts")),
        hit_by_pitch: as_u32(get("hitByPitch")),
        put_outs: as_u32(get("putOuts")),
        assists: as_u32(get("assists")),
    }
}

/// Normalize one stored player document. Returns None when the document has
/// no usable name (such records are dropped before they reach the core).
pub fn normalize_player(data: &Value, fallback_id: &str) -> Option<Player> {
    let d = data.as_object()?;

    let id = as_nonempty_string(d.get("id")).unwrap_or_else(|| fallback_id.to_string());
    let name = as_nonempty_string(d.get("name"))?;
    let number = as_u32(d.get("number"));
    let primary_pos = as_nonempty_string(d.get("primaryPos"));

    let stats = normalize_stats(d.get("stats"));

    // Extra-base hits exceeding total hits is a data-integrity bug upstream.
    // The slugging computation clamps, so keep the record, but flag it.
    let extra_base = stats.doubles + stats.triples + stats.home_runs;
    if extra_base > stats.hits {
        warn!(
            player = %id,
            hits = stats.hits,
            extra_base,
            "stat line has more extra-base hits than hits"
        );
    }

    Some(Player {
        id,
        name,
        number,
        primary_pos,
        stats,
    })
}

/// Normalize a season record object.
pub fn normalize_record(v: Option<&Value>) -> TeamRecord {
    let get = |key: &str| v.and_then(|d| d.get(key));
    TeamRecord {
        wins: as_u32(get("wins")),
        losses: as_u32(get("losses")),
        ties: as_u32(get("ties")),
    }
}

/// Normalize a season metadata document, filling gaps from `fallback`.
pub fn normalize_meta(data: &Value, fallback: &SeasonMeta) -> SeasonMeta {
    let d = data.as_object();
    let get = |key: &str| d.and_then(|m| m.get(key));

    SeasonMeta {
        team_name: as_nonempty_string(get("teamName"))
            .unwrap_or_else(|| fallback.team_name.clone()),
        season_label: as_nonempty_string(get("seasonLabel"))
            .unwrap_or_else(|| fallback.season_label.clone()),
        league: as_nonempty_string(get("league")).unwrap_or_else(|| fallback.league.clone()),
        record: normalize_record(get("record")),
    }
}
