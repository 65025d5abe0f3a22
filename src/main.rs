// Dugout entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the store
// 4. Dispatch the subcommand

use dugout::config;
use dugout::game;
use dugout::leaders;
use dugout::report;
use dugout::roster::import;
use dugout::roster::sort;
use dugout::store::Store;
use dugout::trophies;

use anyhow::{bail, Context};
use std::path::Path;
use tracing::info;

const USAGE: &str = "\
usage: dugout <command>

commands:
  roster             print the roster table (stats, leader markers)
  leaders            print the per-statistic team leaders
  trophies           print the end-of-season trophy case
  seed               replace the roster with the built-in demo roster
  rebuild <csv>      replace the roster from a draft CSV (name,number,primary_pos)
  game <toml>        apply a game file (result, score, per-player lines)
  season [<id>]      print or set the current season id
";

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Dugout starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, season={}, league={}",
        config.team_name, config.season_label, config.league
    );

    // 3. Open the store
    let store = Store::open(&config.db_path).context("failed to open store")?;
    info!("Store opened at {}", config.db_path);

    let season_id = store
        .current_season_id(&config.default_season_id)
        .context("failed to resolve current season")?;

    // 4. Dispatch the subcommand
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("roster") => cmd_roster(&store, &config, &season_id),
        Some("leaders") => cmd_leaders(&store, &season_id),
        Some("trophies") => cmd_trophies(&store, &season_id),
        Some("seed") => cmd_seed(&store, &season_id),
        Some("rebuild") => cmd_rebuild(&store, &season_id, args.get(1)),
        Some("game") => cmd_game(&store, &season_id, args.get(1)),
        Some("season") => cmd_season(&store, &config, args.get(1)),
        Some(other) => {
            eprint!("{USAGE}");
            bail!("unknown command: {other}");
        }
        None => {
            eprint!("{USAGE}");
            Ok(())
        }
    }
}

fn cmd_roster(store: &Store, config: &config::Config, season_id: &str) -> anyhow::Result<()> {
    let meta = store.load_meta(season_id, &config.default_meta())?;
    let players = sort::sorted_for_display(&store.load_players(season_id)?);
    let leaders = leaders::compute_leaders(&players);
    print!("{}", report::render_roster(&meta, &players, &leaders));
    Ok(())
}

fn cmd_leaders(store: &Store, season_id: &str) -> anyhow::Result<()> {
    let players = store.load_players(season_id)?;
    let leaders = leaders::compute_leaders(&players);
    print!("{}", report::render_leaders(&players, &leaders));
    Ok(())
}

fn cmd_trophies(store: &Store, season_id: &str) -> anyhow::Result<()> {
    let players = store.load_players(season_id)?;
    let awards = trophies::compute_trophies(&players);
    print!("{}", report::render_trophies(&awards));
    Ok(())
}

fn cmd_seed(store: &Store, season_id: &str) -> anyhow::Result<()> {
    let n = store.seed_demo_roster(season_id)?;
    println!("Seeded {n} demo players into season {season_id}");
    Ok(())
}

fn cmd_rebuild(store: &Store, season_id: &str, path: Option<&String>) -> anyhow::Result<()> {
    let Some(path) = path else {
        bail!("usage: dugout rebuild <csv>");
    };
    let rows = import::read_draft_csv(Path::new(path))?;
    let n = store.rebuild_roster(season_id, &rows)?;
    println!("Rebuilt season {season_id} with {n} players (record reset)");
    Ok(())
}

fn cmd_game(store: &Store, season_id: &str, path: Option<&String>) -> anyhow::Result<()> {
    let Some(path) = path else {
        bail!("usage: dugout game <toml>");
    };
    let entry = game::load_game_toml(Path::new(path))?;
    let applied = store.apply_game(season_id, &entry)?;
    println!(
        "Applied game {} ({} player lines)",
        applied.game_id, applied.lines_written
    );
    Ok(())
}

fn cmd_season(store: &Store, config: &config::Config, id: Option<&String>) -> anyhow::Result<()> {
    match id {
        Some(id) => {
            store.set_current_season_id(id)?;
            println!("Current season set to {id}");
        }
        None => println!("{}", store.current_season_id(&config.default_season_id)?),
    }
    Ok(())
}

/// Initialize tracing to log to a file so command output stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("dugout.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dugout=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
