//! Simulation loop thread: runs the engine at the configured tick rate and
//! emits a snapshot after every tick.
//!
//! The engine is created inside the thread so the thread owns it outright.
//! Commands arrive over an `mpsc` channel. Snapshots go to a `SnapshotSink`
//! and are stored in shared state for polling.

use std::io::{self, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use airspace_core::commands::OperatorCommand;
use airspace_core::config::SimConfig;
use airspace_core::enums::SimPhase;
use airspace_core::state::AirspaceSnapshot;
use airspace_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Receives every snapshot the loop produces.
pub trait SnapshotSink: Send {
    fn emit(&mut self, snapshot: &AirspaceSnapshot) -> io::Result<()>;
}

/// Writes each snapshot as one line of JSON.
pub struct JsonLines<W> {
    writer: W,
}

impl<W: Write + Send> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SnapshotSink for JsonLines<W> {
    fn emit(&mut self, snapshot: &AirspaceSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Discards snapshots. The shared latest snapshot is still updated.
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&mut self, _snapshot: &AirspaceSnapshot) -> io::Result<()> {
        Ok(())
    }
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: f64) -> Duration {
    Duration::from_secs_f64(1.0 / tick_rate)
}

/// Options for a loop run.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Start the session as soon as the loop starts.
    pub auto_start: bool,
    /// Stop once the session reaches game over.
    pub stop_on_game_over: bool,
}

/// Spawns the loop in a new thread.
///
/// Returns the command sender and the thread handle. The engine is built from
/// `config` before the thread starts, so an invalid config fails here.
pub fn spawn_game_loop<S: SnapshotSink + 'static>(
    config: SimConfig,
    options: LoopOptions,
    sink: S,
    latest_snapshot: Arc<Mutex<Option<AirspaceSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let engine = SimulationEngine::new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("airspace-sim-loop".into())
        .spawn(move || {
            run_game_loop(engine, options, sink, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The loop. Runs until Shutdown, channel disconnect, or a stop condition
/// from `options`.
fn run_game_loop<S: SnapshotSink>(
    mut engine: SimulationEngine,
    options: LoopOptions,
    mut sink: S,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<AirspaceSnapshot>>,
) {
    let tick_duration = tick_duration(engine.config().tick_rate);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    if options.auto_start {
        engine.queue_command(OperatorCommand::Start);
    }
    info!(tick_rate = engine.config().tick_rate, "simulation loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::SpawnFlight(spec)) => {
                    if let Err(err) = engine.spawn_flight(spec) {
                        warn!(%err, "host flight rejected");
                    }
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(ticks, "simulation loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        let snapshot = engine.tick();
        ticks += 1;
        let game_over = snapshot.phase == SimPhase::GameOver;

        // 3. Emit
        if let Err(err) = sink.emit(&snapshot) {
            warn!(%err, "snapshot sink failed, stopping loop");
            return;
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.max_ticks.is_some_and(|max| ticks >= max)
            || (options.stop_on_game_over && game_over)
        {
            info!(ticks, game_over, "simulation loop finished");
            return;
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            debug!("loop behind schedule, resetting tick clock");
            next_tick_time = now;
        }
    }
}
