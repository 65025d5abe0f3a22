// Trophy catalog and unique-winner allocation.
//
// The catalog is a fixed, priority-ordered table of plain data records: each
// trophy names a qualifier, a primary scoring accessor, three tie-break
// accessors, and a value formatter. One generic allocation routine walks the
// catalog in order, maintaining a global already-won set so no player
// receives more than one trophy. With a roster of 12+ players every player
// earns exactly one award; smaller rosters simply produce fewer awards.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::roster::player::Player;
use crate::stats;

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrophyKey {
    BattingChamp,
    OnBaseKing,
    Slugger,
    OpsStar,
    RbiProducer,
    RunMachine,
    HitLeader,
    IronTiger,
    GoldGlove,
    CannonArm,
    WalkWizard,
    BrickWall,
}

/// A catalog entry. The accessor fields are plain function pointers so the
/// catalog stays a data table, testable apart from the allocation loop.
pub struct TrophyDef {
    pub key: TrophyKey,
    pub title: &'static str,
    pub subtitle: &'static str,
    qualifier: fn(&Player) -> bool,
    score: fn(&Player) -> f64,
    tie_breaks: [fn(&Player) -> f64; 3],
    format_value: fn(&Player) -> (String, String),
}

/// Result of allocating one trophy.
#[derive(Clone)]
pub struct TrophyAward {
    pub trophy: &'static TrophyDef,
    pub winner: Player,
    pub runner_up: Option<Player>,
    pub value_label: String,
    pub value_sub: String,
}

// ---------------------------------------------------------------------------
// Accessors (scoring, tie-breaks, qualifiers)
// ---------------------------------------------------------------------------

fn qualify_all(_p: &Player) -> bool {
    true
}

/// Rate trophies on the AB denominator require at least 10 at-bats.
fn qualify_10_ab(p: &Player) -> bool {
    p.stats.at_bats >= 10
}

/// Rate trophies on the PA denominator require at least 10 AB+BB+HBP.
fn qualify_10_pa(p: &Player) -> bool {
    p.stats.obp_denominator() >= 10
}

fn avg(p: &Player) -> f64 {
    stats::batting_average(p)
}

fn obp(p: &Player) -> f64 {
    stats::on_base_percentage(p)
}

fn slg(p: &Player) -> f64 {
    stats::slugging(p)
}

fn ops(p: &Player) -> f64 {
    stats::ops(p)
}

fn at_bats(p: &Player) -> f64 {
    p.stats.at_bats as f64
}

fn plate_apps(p: &Player) -> f64 {
    p.stats.obp_denominator() as f64
}

fn games(p: &Player) -> f64 {
    p.stats.games as f64
}

fn hits(p: &Player) -> f64 {
    p.stats.hits as f64
}

fn runs(p: &Player) -> f64 {
    p.stats.runs as f64
}

fn rbi(p: &Player) -> f64 {
    p.stats.rbi as f64
}

fn walks(p: &Player) -> f64 {
    p.stats.walks as f64
}

fn hit_by_pitch(p: &Player) -> f64 {
    p.stats.hit_by_pitch as f64
}

fn put_outs(p: &Player) -> f64 {
    p.stats.put_outs as f64
}

fn assists(p: &Player) -> f64 {
    p.stats.assists as f64
}

fn times_on_base(p: &Player) -> f64 {
    p.stats.times_on_base() as f64
}

// ---------------------------------------------------------------------------
// Value formatters
// ---------------------------------------------------------------------------

fn fmt_batting_champ(p: &Player) -> (String, String) {
    (
        stats::fmt3(avg(p)),
        format!("{} H / {} AB", p.stats.hits, p.stats.at_bats),
    )
}

fn fmt_on_base_king(p: &Player) -> (String, String) {
    (
        stats::fmt3(obp(p)),
        format!(
            "{} on base / {} PA",
            p.stats.times_on_base(),
            p.stats.obp_denominator()
        ),
    )
}

fn fmt_slugger(p: &Player) -> (String, String) {
    (
        stats::fmt3(slg(p)),
        format!(
            "2B {} • 3B {} • HR {}",
            p.stats.doubles, p.stats.triples, p.stats.home_runs
        ),
    )
}

fn fmt_ops_star(p: &Player) -> (String, String) {
    (
        stats::fmt3(ops(p)),
        format!(
            "OBP {} + SLG {}",
            stats::fmt3(obp(p)),
            stats::fmt3(slg(p))
        ),
    )
}

fn fmt_rbi_producer(p: &Player) -> (String, String) {
    (p.stats.rbi.to_string(), "Runs batted in".into())
}

fn fmt_run_machine(p: &Player) -> (String, String) {
    (p.stats.runs.to_string(), "Runs scored".into())
}

fn fmt_hit_leader(p: &Player) -> (String, String) {
    (p.stats.hits.to_string(), "Total hits".into())
}

fn fmt_iron_tiger(p: &Player) -> (String, String) {
    (p.stats.games.to_string(), "Games played".into())
}

fn fmt_gold_glove(p: &Player) -> (String, String) {
    (p.stats.put_outs.to_string(), "Put outs (PO)".into())
}

fn fmt_cannon_arm(p: &Player) -> (String, String) {
    (p.stats.assists.to_string(), "Assists (A)".into())
}

fn fmt_walk_wizard(p: &Player) -> (String, String) {
    (p.stats.walks.to_string(), "Walks (BB)".into())
}

fn fmt_brick_wall(p: &Player) -> (String, String) {
    (p.stats.hit_by_pitch.to_string(), "Hit by pitch (HBP)".into())
}

// ---------------------------------------------------------------------------
// The catalog
// ---------------------------------------------------------------------------

/// Fixed priority order: rate-based "prestige" awards resolve before
/// counting-stat awards, so the best hitters take the marquee trophies and
/// the counting trophies spread across the rest of the roster.
static CATALOG: [TrophyDef; 12] = [
    TrophyDef {
        key: TrophyKey::BattingChamp,
        title: "Batting Champ",
        subtitle: "Highest batting average (min 10 AB)",
        qualifier: qualify_10_ab,
        score: avg,
        tie_breaks: [at_bats, plate_apps, games],
        format_value: fmt_batting_champ,
    },
    TrophyDef {
        key: TrophyKey::OnBaseKing,
        title: "On-Base King",
        subtitle: "Highest OBP (min 10 PA)",
        qualifier: qualify_10_pa,
        score: obp,
        tie_breaks: [plate_apps, times_on_base, games],
        format_value: fmt_on_base_king,
    },
    TrophyDef {
        key: TrophyKey::Slugger,
        title: "Slugger",
        subtitle: "Highest slugging (min 10 AB)",
        qualifier: qualify_10_ab,
        score: slg,
        tie_breaks: [at_bats, hits, games],
        format_value: fmt_slugger,
    },
    TrophyDef {
        key: TrophyKey::OpsStar,
        title: "OPS Star",
        subtitle: "Best all-around hitter (min 10 PA)",
        qualifier: qualify_10_pa,
        score: ops,
        tie_breaks: [plate_apps, at_bats, games],
        format_value: fmt_ops_star,
    },
    TrophyDef {
        key: TrophyKey::RbiProducer,
        title: "RBI Producer",
        subtitle: "Most RBIs",
        qualifier: qualify_all,
        score: rbi,
        tie_breaks: [hits, plate_apps, games],
        format_value: fmt_rbi_producer,
    },
    TrophyDef {
        key: TrophyKey::RunMachine,
        title: "Run Machine",
        subtitle: "Most runs scored",
        qualifier: qualify_all,
        score: runs,
        tie_breaks: [times_on_base, plate_apps, games],
        format_value: fmt_run_machine,
    },
    TrophyDef {
        key: TrophyKey::HitLeader,
        title: "Hit Leader",
        subtitle: "Most hits",
        qualifier: qualify_all,
        score: hits,
        tie_breaks: [at_bats, runs, games],
        format_value: fmt_hit_leader,
    },
    TrophyDef {
        key: TrophyKey::IronTiger,
        title: "Iron Tiger",
        subtitle: "Most games played",
        qualifier: qualify_all,
        score: games,
        tie_breaks: [plate_apps, at_bats, hits],
        format_value: fmt_iron_tiger,
    },
    TrophyDef {
        key: TrophyKey::GoldGlove,
        title: "Gold Glove",
        subtitle: "Most put outs (PO)",
        qualifier: qualify_all,
        score: put_outs,
        tie_breaks: [assists, games, plate_apps],
        format_value: fmt_gold_glove,
    },
    TrophyDef {
        key: TrophyKey::CannonArm,
        title: "Cannon Arm",
        subtitle: "Most assists (A)",
        qualifier: qualify_all,
        score: assists,
        tie_breaks: [put_outs, games, plate_apps],
        format_value: fmt_cannon_arm,
    },
    TrophyDef {
        key: TrophyKey::WalkWizard,
        title: "Walk Wizard",
        subtitle: "Most walks (BB)",
        qualifier: qualify_all,
        score: walks,
        tie_breaks: [plate_apps, hits, games],
        format_value: fmt_walk_wizard,
    },
    TrophyDef {
        key: TrophyKey::BrickWall,
        title: "The Brick Wall",
        subtitle: "Most hit by pitch (HBP)",
        qualifier: qualify_all,
        score: hit_by_pitch,
        tie_breaks: [plate_apps, games, walks],
        format_value: fmt_brick_wall,
    },
];

/// The full catalog in allocation priority order.
pub fn catalog() -> &'static [TrophyDef] {
    &CATALOG
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

struct Candidate<'a> {
    player: &'a Player,
    score: f64,
    tie: [f64; 3],
}

impl<'a> Candidate<'a> {
    fn build(def: &TrophyDef, player: &'a Player) -> Self {
        // Failing the qualifier scores -1: unrankable, but still present in
        // the candidate list so runner-up selection can fall through to it.
        let score = if (def.qualifier)(player) {
            (def.score)(player)
        } else {
            -1.0
        };
        Candidate {
            player,
            score,
            tie: [
                (def.tie_breaks[0])(player),
                (def.tie_breaks[1])(player),
                (def.tie_breaks[2])(player),
            ],
        }
    }
}

/// Descending by score, then each tie-break, then ascending by name. The name
/// fallback guarantees a total ordering: no unresolved ties reach the output.
fn cmp_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.tie[0].total_cmp(&a.tie[0]))
        .then_with(|| b.tie[1].total_cmp(&a.tie[1]))
        .then_with(|| b.tie[2].total_cmp(&a.tie[2]))
        .then_with(|| a.player.name.cmp(&b.player.name))
}

fn allocate(
    def: &'static TrophyDef,
    players: &[Player],
    won: &mut HashSet<String>,
) -> Option<TrophyAward> {
    let mut candidates: Vec<Candidate> = players
        .iter()
        .map(|p| Candidate::build(def, p))
        .collect();
    candidates.sort_by(cmp_candidates);

    // Best candidate who hasn't already won. If every player has already won
    // (roster smaller than the catalog), the trophy goes unallocated.
    let winner = candidates.iter().find(|c| !won.contains(&c.player.id))?.player;
    won.insert(winner.id.clone());

    // Runner-up: next distinct candidate, preferring one who hasn't already
    // won; if everyone else already won, still show the best of them.
    let runner_up = candidates
        .iter()
        .find(|c| c.player.id != winner.id && !won.contains(&c.player.id))
        .or_else(|| candidates.iter().find(|c| c.player.id != winner.id))
        .map(|c| c.player.clone());

    let (value_label, value_sub) = (def.format_value)(winner);

    Some(TrophyAward {
        trophy: def,
        winner: winner.clone(),
        runner_up,
        value_label,
        value_sub,
    })
}

/// Assign at most one trophy per player, processing the catalog strictly in
/// priority order. Returns awards in catalog order, omitting any trophy that
/// could not be allocated. Deterministic for a fixed input list: the roster
/// is pre-sorted by name before candidates are built.
pub fn compute_trophies(players: &[Player]) -> Vec<TrophyAward> {
    if players.is_empty() {
        return Vec::new();
    }

    let mut list = players.to_vec();
    list.sort_by(|a, b| a.name.cmp(&b.name));

    let mut won: HashSet<String> = HashSet::new();

    catalog()
        .iter()
        .filter_map(|def| allocate(def, &list, &mut won))
        .collect()
}
