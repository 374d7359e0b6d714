//! Headless runs: tick the engine as fast as possible for a fixed number of
//! ticks, log what happened and report a summary.

use serde::Serialize;
use tracing::{debug, info, warn};

use airspace_core::commands::OperatorCommand;
use airspace_core::config::SimConfig;
use airspace_core::enums::SimPhase;
use airspace_core::events::SimEvent;
use airspace_core::state::AirspaceSnapshot;
use airspace_sim::SimulationEngine;

use crate::game_loop::SnapshotSink;

/// Outcome of a headless run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: SimPhase,
    pub total_score: i64,
    pub flights_completed: u32,
    pub collisions: u32,
    pub separation_warnings: u32,
    pub aircraft_remaining: usize,
}

/// Run a fresh session for up to `ticks` ticks, stopping early on game over.
///
/// With `autopilot` set, every waiting aircraft is cleared to land and every
/// grounded aircraft is cleared for takeoff each tick. The engine rejects the
/// clearances it cannot grant.
pub fn run_headless(
    config: SimConfig,
    ticks: u64,
    autopilot: bool,
    sink: &mut dyn SnapshotSink,
) -> anyhow::Result<RunSummary> {
    let mut engine = SimulationEngine::new(config)?;
    engine.queue_command(OperatorCommand::Start);

    let mut summary = RunSummary::default();
    let mut last = AirspaceSnapshot::default();
    for _ in 0..ticks {
        let snapshot = engine.tick();
        summary.ticks += 1;
        summary.separation_warnings += log_events(&snapshot.events);
        sink.emit(&snapshot)?;

        if snapshot.phase == SimPhase::GameOver {
            last = snapshot;
            break;
        }
        if autopilot {
            engine.queue_commands(clearances(&snapshot));
        }
        last = snapshot;
    }

    summary.elapsed_secs = last.time.elapsed_secs;
    summary.phase = last.phase;
    summary.total_score = last.score.total;
    summary.flights_completed = last.score.flights_completed;
    summary.collisions = last.score.collisions;
    summary.aircraft_remaining = last.aircraft.iter().filter(|a| !a.finished).count();
    Ok(summary)
}

/// Landing and takeoff clearances for every aircraft that could use one.
pub fn clearances(snapshot: &AirspaceSnapshot) -> Vec<OperatorCommand> {
    snapshot
        .aircraft
        .iter()
        .filter(|a| !a.finished)
        .filter_map(|a| {
            let callsign = a.callsign.clone();
            if a.grounded {
                Some(OperatorCommand::TakeOff { callsign })
            } else if a.waiting_to_land && !a.landing {
                Some(OperatorCommand::Land { callsign })
            } else {
                None
            }
        })
        .collect()
}

/// Log a tick's events. Returns the number of separation warnings.
///
/// Events the engine already logs at `info` or above (phase changes,
/// clearances, completions, collisions) are repeated here at `debug` only.
pub fn log_events(events: &[SimEvent]) -> u32 {
    let mut warnings = 0;
    for event in events {
        match event {
            SimEvent::FlightEntered { callsign, grounded } => {
                info!(%callsign, grounded, "flight entered")
            }
            SimEvent::SeparationWarning { callsigns } => {
                warnings += 1;
                warn!(?callsigns, "separation warning");
            }
            SimEvent::Collision { first, second } => debug!(%first, %second, "collision"),
            SimEvent::FlightCompleted {
                callsign,
                outcome,
                score,
            } => debug!(%callsign, ?outcome, score, "flight completed"),
            SimEvent::LandingCleared { callsign, airport } => {
                debug!(%callsign, %airport, "cleared to land")
            }
            SimEvent::TakeOffCleared { callsign, airport } => {
                debug!(%callsign, %airport, "cleared for takeoff")
            }
            SimEvent::PathAltered {
                callsign,
                stage,
                waypoint,
                score,
            } => info!(%callsign, stage, %waypoint, score, "path altered"),
            SimEvent::PhaseChanged { phase } => debug!(?phase, "phase changed"),
        }
    }
    warnings
}
