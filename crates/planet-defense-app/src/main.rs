use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use planet_defense_app::config::load_config;
use planet_defense_app::game_loop::{spawn_game_loop, LoopOptions, RunSummary};
use planet_defense_app::store::{today, ScoreStore};
use planet_defense_core::leaderboard::Leaderboard;
use planet_defense_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "planet-defense")]
#[command(about = "Headless Planet Defense: plays seeded runs with an autopilot and keeps scores")]
struct Cli {
    /// RNG seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many waves have been cleared
    #[arg(long)]
    waves: Option<u32>,
    #[arg(long, default_value_t = 216_000)]
    max_ticks: u64,
    /// Pace the simulation to wall-clock time
    #[arg(long)]
    realtime: bool,
    /// JSON file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding high_score.json and leaderboard.json
    #[arg(long, default_value = ".planet-defense")]
    data_dir: PathBuf,
    /// Name recorded on the leaderboard
    #[arg(long, default_value = "Autopilot")]
    name: String,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref().map(load_config).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            error!(%err, "could not load config");
            return ExitCode::FAILURE;
        }
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let store = ScoreStore::new(&cli.data_dir);
    let high_score = store.load_high_score().unwrap_or_else(|err| {
        warn!(%err, "high score unavailable, starting from 0");
        0
    });

    info!(seed = config.seed, high_score, chain_reactions = config.chain_reactions, "starting run");
    let options = LoopOptions {
        max_waves: cli.waves,
        max_ticks: cli.max_ticks,
        realtime: cli.realtime,
        autopilot: true,
    };
    let summary = match run(config, high_score, options) {
        Ok(summary) => summary,
        Err(err) => {
            error!(%err, "game loop failed");
            return ExitCode::FAILURE;
        }
    };

    record_scores(&store, &cli.name, &summary);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => warn!(%err, "could not print summary"),
    }
    ExitCode::SUCCESS
}

fn run(config: SimConfig, high_score: u32, options: LoopOptions) -> std::io::Result<RunSummary> {
    let (cmd_tx, handle) = spawn_game_loop(config, high_score, options)?;
    let summary = handle
        .join()
        .map_err(|_| std::io::Error::other("game loop thread panicked"))?;
    drop(cmd_tx);
    Ok(summary)
}

fn record_scores(store: &ScoreStore, name: &str, summary: &RunSummary) {
    if summary.new_high_score {
        if let Err(err) = store.save_high_score(summary.high_score) {
            warn!(%err, "could not save high score");
        }
    }

    let mut board = store.load_leaderboard().unwrap_or_else(|err| {
        warn!(%err, "leaderboard unavailable, starting a new one");
        Leaderboard::new()
    });
    if !board.is_high_score(summary.score) {
        return;
    }
    let Some(rank) = board.add_entry(name, summary.score, summary.wave, summary.accuracy, &today())
    else {
        return;
    };
    info!(rank = rank + 1, score = summary.score, "leaderboard entry");
    match store.save_leaderboard(&board) {
        Ok(()) => info!(dir = %store.dir().display(), "scores saved"),
        Err(err) => warn!(%err, "could not save leaderboard"),
    }
}
