// SQLite persistence layer for seasons, player documents, and games.
//
// The hosted document store this app fronts keeps players and season
// metadata as schemaless documents; we mirror that shape locally with JSON
// text columns and run every document through the normalization boundary on
// the way out. Mutations (roster rebuild, game apply) are transactional.

use std::sync::{Mutex, MutexGuard};

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{info, warn};

use crate::game::{GameEntry, GameResult};
use crate::roster::import::DraftRow;
use crate::roster::normalize;
use crate::roster::player::{BattingStats, Player, SeasonMeta, TeamRecord};

/// Outcome of applying one game.
#[derive(Debug, Clone)]
pub struct AppliedGame {
    pub game_id: String,
    pub lines_written: usize,
}

/// SQLite-backed store for seasons, player documents, games, and app config.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the store at `path` and ensure all tables exist.
    /// Pass `":memory:"` for an ephemeral in-memory store (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open store at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set store pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS app_config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS seasons (
                id  TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS players (
                season_id TEXT NOT NULL,
                player_id TEXT NOT NULL,
                doc       TEXT NOT NULL,
                PRIMARY KEY (season_id, player_id)
            );

            CREATE TABLE IF NOT EXISTS games (
                season_id TEXT NOT NULL,
                game_id   TEXT NOT NULL,
                doc       TEXT NOT NULL,
                PRIMARY KEY (season_id, game_id)
            );

            CREATE TABLE IF NOT EXISTS game_lines (
                season_id TEXT NOT NULL,
                game_id   TEXT NOT NULL,
                player_id TEXT NOT NULL,
                doc       TEXT NOT NULL,
                PRIMARY KEY (season_id, game_id, player_id)
            );

            -- Monotonic rebuild counter per season: player ids embed it so an
            -- id is never reused after a rebuild deletes its record.
            CREATE TABLE IF NOT EXISTS roster_revs (
                season_id TEXT PRIMARY KEY,
                rev       INTEGER NOT NULL
            );
            ",
        )
        .context("failed to create store schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Access the connection. Panics only if another thread panicked while
    /// holding the lock.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }

    // -----------------------------------------------------------------------
    // App config
    // -----------------------------------------------------------------------

    /// The season the app is currently pointed at, falling back to the
    /// caller-supplied default (normally `team.default_season_id` from the
    /// config) when the config document is absent or blank.
    pub fn current_season_id(&self, fallback: &str) -> Result<String> {
        let conn = self.conn();
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM app_config WHERE key = 'current_season_id'",
                [],
                |row| row.get(0),
            )
            .optional()
            .context("failed to read current season id")?;

        Ok(value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.to_string()))
    }

    /// Point the app at a different season.
    pub fn set_current_season_id(&self, season_id: &str) -> Result<()> {
        let season_id = season_id.trim();
        if season_id.is_empty() {
            bail!("season id is required");
        }
        let conn = self.conn();
        conn.execute(
            "INSERT INTO app_config (key, value) VALUES ('current_season_id', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![season_id],
        )
        .context("failed to set current season id")?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Seasons
    // -----------------------------------------------------------------------

    /// Create or update a season's metadata document.
    pub fn upsert_season(&self, season_id: &str, meta: &SeasonMeta) -> Result<()> {
        let doc = serde_json::to_string(meta).context("failed to encode season doc")?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO seasons (id, doc) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
            params![season_id, doc],
        )
        .context("failed to upsert season")?;
        Ok(())
    }

    /// Load a season's metadata, normalizing the stored document and filling
    /// gaps from `fallback`. A missing season yields the fallback unchanged.
    pub fn load_meta(&self, season_id: &str, fallback: &SeasonMeta) -> Result<SeasonMeta> {
        let conn = self.conn();
        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM seasons WHERE id = ?1",
                params![season_id],
                |row| row.get(0),
            )
            .optional()
            .context("failed to read season doc")?;

        let Some(doc) = doc else {
            return Ok(fallback.clone());
        };

        let value: Value = serde_json::from_str(&doc)
            .with_context(|| format!("season {season_id} has an unreadable doc"))?;
        Ok(normalize::normalize_meta(&value, fallback))
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Load every player document for a season, normalized and with invalid
    /// (nameless) records dropped.
    pub fn load_players(&self, season_id: &str) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT player_id, doc FROM players WHERE season_id = ?1 ORDER BY player_id",
            )
            .context("failed to prepare player query")?;

        let rows = stmt
            .query_map(params![season_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .context("failed to query players")?;

        let mut players = Vec::new();
        for row in rows {
            let (player_id, doc) = row.context("failed to read player row")?;
            let value: Value = match serde_json::from_str(&doc) {
                Ok(v) => v,
                Err(e) => {
                    warn!(player = %player_id, error = %e, "dropping unreadable player doc");
                    continue;
                }
            };
            match normalize::normalize_player(&value, &player_id) {
                Some(p) => players.push(p),
                None => warn!(player = %player_id, "dropping nameless player doc"),
            }
        }

        Ok(players)
    }

    /// Replace the entire roster for a season: delete all existing player
    /// records, insert the draft rows as fresh zero-stat players, and reset
    /// the season record. Game history is left in place for audit.
    ///
    /// Player ids embed a per-season rebuild revision, so ids from a deleted
    /// roster are never reused.
    pub fn rebuild_roster(&self, season_id: &str, rows: &[DraftRow]) -> Result<usize> {
        let cleaned: Vec<&DraftRow> = rows.iter().filter(|r| !r.name.trim().is_empty()).collect();
        if cleaned.is_empty() {
            bail!("add at least one player name");
        }

        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin rebuild")?;

        let rev: i64 = tx
            .query_row(
                "INSERT INTO roster_revs (season_id, rev) VALUES (?1, 1)
                 ON CONFLICT(season_id) DO UPDATE SET rev = rev + 1
                 RETURNING rev",
                params![season_id],
                |row| row.get(0),
            )
            .context("failed to bump roster revision")?;

        tx.execute(
            "DELETE FROM players WHERE season_id = ?1",
            params![season_id],
        )
        .context("failed to delete old roster")?;

        for (i, row) in cleaned.iter().enumerate() {
            let player = Player {
                id: format!("r{rev}-p{:02}", i + 1),
                name: row.name.clone(),
                number: row.number,
                primary_pos: row.primary_pos.clone(),
                stats: BattingStats::default(),
            };
            let doc = serde_json::to_string(&player).context("failed to encode player doc")?;
            tx.execute(
                "INSERT INTO players (season_id, player_id, doc) VALUES (?1, ?2, ?3)",
                params![season_id, player.id, doc],
            )
            .with_context(|| format!("failed to insert player {}", player.name))?;
        }

        // Reset the season record; a rebuilt roster starts the season over.
        reset_season_record(&tx, season_id)?;

        tx.commit().context("failed to commit rebuild")?;

        info!(season = season_id, players = cleaned.len(), "roster rebuilt");
        Ok(cleaned.len())
    }

    /// Insert a 12-player demo roster (zero stats). Uses the same rebuild
    /// path as a CSV import.
    pub fn seed_demo_roster(&self, season_id: &str) -> Result<usize> {
        let rows: Vec<DraftRow> = DEMO_ROSTER
            .iter()
            .map(|(name, number, pos)| DraftRow {
                name: (*name).to_string(),
                number: *number,
                primary_pos: Some((*pos).to_string()),
            })
            .collect();
        self.rebuild_roster(season_id, &rows)
    }

    // -----------------------------------------------------------------------
    // Games
    // -----------------------------------------------------------------------

    /// Apply one game: insert the game and its line documents, add each
    /// non-zero line's deltas to the player's stored counting stats, and
    /// increment the season W/L/T record. All inside one transaction.
    ///
    /// Lines for unknown player ids are skipped with a warning. A game in
    /// which every line is zero is rejected.
    pub fn apply_game(&self, season_id: &str, entry: &GameEntry) -> Result<AppliedGame> {
        if !entry.any_nonzero_line() {
            bail!("no player stats were entered (everything is zero)");
        }

        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin game apply")?;

        // Uniquify the id stem in case the team plays the same opponent
        // twice in one day. Exact-id probing, not a prefix count: one
        // opponent's slug may be a prefix of another's.
        let stem = entry.id_stem();
        let mut game_id = stem.clone();
        let mut n = 1;
        loop {
            let taken: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM games WHERE season_id = ?1 AND game_id = ?2",
                    params![season_id, game_id],
                    |row| row.get(0),
                )
                .context("failed to check existing games")?;
            if taken == 0 {
                break;
            }
            n += 1;
            game_id = format!("{stem}-{n}");
        }

        let game_doc = serde_json::to_string(entry).context("failed to encode game doc")?;
        tx.execute(
            "INSERT INTO games (season_id, game_id, doc) VALUES (?1, ?2, ?3)",
            params![season_id, game_id, game_doc],
        )
        .context("failed to insert game")?;

        let mut lines_written = 0;
        for (player_id, delta) in &entry.lines {
            if delta.is_zero() {
                continue;
            }

            let doc: Option<String> = tx
                .query_row(
                    "SELECT doc FROM players WHERE season_id = ?1 AND player_id = ?2",
                    params![season_id, player_id],
                    |row| row.get(0),
                )
                .optional()
                .context("failed to read player for game line")?;

            let Some(doc) = doc else {
                warn!(player = %player_id, game = %game_id, "game line for unknown player, skipping");
                continue;
            };

            let value: Value = serde_json::from_str(&doc)
                .with_context(|| format!("player {player_id} has an unreadable doc"))?;
            let Some(mut player) = normalize::normalize_player(&value, player_id) else {
                warn!(player = %player_id, game = %game_id, "game line for invalid player doc, skipping");
                continue;
            };

            delta.apply_to(&mut player.stats);

            let updated =
                serde_json::to_string(&player).context("failed to encode player doc")?;
            tx.execute(
                "UPDATE players SET doc = ?3 WHERE season_id = ?1 AND player_id = ?2",
                params![season_id, player_id, updated],
            )
            .context("failed to update player stats")?;

            let line_doc = serde_json::json!({
                "playerId": player_id,
                "name": player.name,
                "number": player.number,
                "delta": delta,
            });
            tx.execute(
                "INSERT INTO game_lines (season_id, game_id, player_id, doc)
                 VALUES (?1, ?2, ?3, ?4)",
                params![season_id, game_id, player_id, line_doc.to_string()],
            )
            .context("failed to insert game line")?;

            lines_written += 1;
        }

        if lines_written == 0 {
            bail!("no game lines matched a rostered player");
        }

        bump_season_record(&tx, season_id, entry.result)?;

        tx.commit().context("failed to commit game")?;

        info!(
            season = season_id,
            game = %game_id,
            lines = lines_written,
            "game applied"
        );
        Ok(AppliedGame {
            game_id,
            lines_written,
        })
    }
}

/// Zero out a season's W/L/T record, creating a minimal season doc if none
/// exists yet.
fn reset_season_record(tx: &rusqlite::Transaction<'_>, season_id: &str) -> Result<()> {
    let doc: Option<String> = tx
        .query_row(
            "SELECT doc FROM seasons WHERE id = ?1",
            params![season_id],
            |row| row.get(0),
        )
        .optional()
        .context("failed to read season for record reset")?;

    let mut value: Value = match doc {
        Some(d) => serde_json::from_str(&d).unwrap_or(Value::Null),
        None => Value::Null,
    };
    if !value.is_object() {
        value = serde_json::json!({});
    }
    value["record"] = serde_json::to_value(TeamRecord::default())?;

    tx.execute(
        "INSERT INTO seasons (id, doc) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
        params![season_id, value.to_string()],
    )
    .context("failed to reset season record")?;
    Ok(())
}

/// Increment the season record field matching a game result.
fn bump_season_record(
    tx: &rusqlite::Transaction<'_>,
    season_id: &str,
    result: GameResult,
) -> Result<()> {
    let doc: Option<String> = tx
        .query_row(
            "SELECT doc FROM seasons WHERE id = ?1",
            params![season_id],
            |row| row.get(0),
        )
        .optional()
        .context("failed to read season for record bump")?;

    let mut value: Value = match doc {
        Some(d) => serde_json::from_str(&d).unwrap_or(Value::Null),
        None => Value::Null,
    };
    if !value.is_object() {
        value = serde_json::json!({});
    }

    let mut record = normalize::normalize_record(value.get("record"));
    match result {
        GameResult::Win => record.wins += 1,
        GameResult::Loss => record.losses += 1,
        GameResult::Tie => record.ties += 1,
    }
    value["record"] = serde_json::to_value(record)?;

    tx.execute(
        "INSERT INTO seasons (id, doc) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
        params![season_id, value.to_string()],
    )
    .context("failed to bump season record")?;
    Ok(())
}

/// The demo roster used by `dugout seed`.
const DEMO_ROSTER: [(&str, u32, &str); 12] = [
    ("Rylan Davenport", 7, "SS"),
    ("Marshall Gonze", 12, "CF"),
    ("Luke Bauer", 3, "2B"),
    ("Noah Green", 9, "1B"),
    ("Declan Gwynn", 21, "P"),
    ("Noah McComiskey", 18, "C"),
    ("Braydon Myers", 2, "3B"),
    ("Keagan Russell", 14, "RF"),
    ("Joel Sanders", 5, "LF"),
    ("Kolby Suter", 11, "P"),
    ("Brayden Wojcicki", 8, "CF"),
    ("John Bazemore", 16, "3B"),
];
