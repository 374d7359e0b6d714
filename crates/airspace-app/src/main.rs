//! Airspace simulator CLI.
//!
//! Headless by default: runs a session for `--ticks` ticks and prints a JSON
//! summary. With `--realtime` the engine runs on a loop thread at the
//! configured tick rate, reading JSON commands from stdin and writing one
//! snapshot per line to stdout.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use airspace_app::game_loop::{self, JsonLines, LoopOptions, NullSink, SnapshotSink};
use airspace_app::headless;
use airspace_app::state::{self, GameLoopCommand, HostState};
use airspace_core::config::{Difficulty, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "airspace")]
#[command(about = "Simulate aircraft separation in a controlled airspace")]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Difficulty (easy, medium, hard), overrides the config file
    #[arg(short, long)]
    difficulty: Option<String>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Aircraft limit, overrides the config file
    #[arg(long)]
    max_aircraft: Option<usize>,

    /// Number of ticks to run (unbounded in realtime mode when omitted)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Run at the configured tick rate and accept commands on stdin
    #[arg(long)]
    realtime: bool,

    /// Write every snapshot to stdout as a JSON line
    #[arg(long)]
    json: bool,

    /// Clear waiting aircraft to land and grounded aircraft to take off
    #[arg(long)]
    autopilot: bool,
}

const DEFAULT_HEADLESS_TICKS: u64 = 3600;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for snapshots.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("airspace=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    info!(
        seed = config.seed,
        difficulty = ?config.difficulty,
        tick_rate = config.tick_rate,
        max_aircraft = config.max_aircraft,
        "starting airspace simulation"
    );

    if args.realtime {
        run_realtime(config, &args)
    } else {
        let mut sink: Box<dyn SnapshotSink> = if args.json {
            Box::new(JsonLines::new(io::stdout()))
        } else {
            Box::new(NullSink)
        };
        let ticks = args.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS);
        let summary = headless::run_headless(config, ticks, args.autopilot, sink.as_mut())?;
        info!(
            ticks = summary.ticks,
            score = summary.total_score,
            completed = summary.flights_completed,
            collisions = summary.collisions,
            "run finished"
        );
        if !args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Ok(())
    }
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(name) = &args.difficulty {
        config.difficulty = name.parse::<Difficulty>()?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max) = args.max_aircraft {
        config.max_aircraft = max;
    }
    config.validate()?;
    Ok(config)
}

fn run_realtime(config: SimConfig, args: &Args) -> Result<()> {
    let host = Arc::new(HostState::new());
    let options = LoopOptions {
        max_ticks: args.ticks,
        auto_start: true,
        stop_on_game_over: false,
    };
    let (tx, handle) = game_loop::spawn_game_loop(
        config,
        options,
        JsonLines::new(io::stdout()),
        Arc::clone(&host.latest_snapshot),
    )?;
    *host
        .command_tx
        .lock()
        .map_err(|_| anyhow::anyhow!("host state poisoned"))? = Some(tx);

    // The reader blocks on stdin, so it runs detached. The loop ends on
    // Shutdown, stdin EOF or the tick limit.
    let reader_host = Arc::clone(&host);
    std::thread::Builder::new()
        .name("airspace-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match state::parse_command_line(&line) {
                    Ok(command) => {
                        let shutdown = matches!(command, GameLoopCommand::Shutdown);
                        if !reader_host.send(command) || shutdown {
                            return;
                        }
                    }
                    Err(err) => warn!(%err, "ignoring malformed command line"),
                }
            }
            reader_host.send(GameLoopCommand::Shutdown);
        })?;

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("simulation loop panicked"))?;

    if let Ok(latest) = host.latest_snapshot.lock() {
        if let Some(snapshot) = latest.as_ref() {
            info!(
                tick = snapshot.time.tick,
                phase = ?snapshot.phase,
                score = snapshot.score.total,
                "realtime session ended"
            );
        }
    }
    Ok(())
}
