//! Host state shared between the input reader and the simulation loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use airspace_core::commands::OperatorCommand;
use airspace_core::state::AirspaceSnapshot;
use airspace_sim::FlightSpec;

/// Commands sent from the input side to the simulation loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An operator command to forward to the simulation engine.
    Operator(OperatorCommand),
    /// Put a host-specified flight into the airspace.
    SpawnFlight(FlightSpec),
    /// Shut down the loop thread gracefully.
    Shutdown,
}

/// Parse one line of host input.
///
/// Lines are JSON objects keyed by `type`. `Shutdown` and `SpawnFlight` are
/// handled by the host; every other type is an operator command.
pub fn parse_command_line(line: &str) -> Result<GameLoopCommand, serde_json::Error> {
    let value: Value = serde_json::from_str(line.trim())?;
    match value.get("type").and_then(Value::as_str) {
        Some("Shutdown") => Ok(GameLoopCommand::Shutdown),
        Some("SpawnFlight") => Ok(GameLoopCommand::SpawnFlight(serde_json::from_value(value)?)),
        _ => Ok(GameLoopCommand::Operator(serde_json::from_value(value)?)),
    }
}

/// Shared host state.
///
/// `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`.
pub struct HostState {
    /// Sender into the loop thread. `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<AirspaceSnapshot>>>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop thread. Returns false once the loop is gone.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(guard) = self.command_tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }
}
