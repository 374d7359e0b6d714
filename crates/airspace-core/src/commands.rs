//! Operator commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the start of the next tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::map::Waypoint;

/// All operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Session control ---
    /// Start a fresh session (from standby or after game over).
    Start,
    Pause,
    Resume,

    // --- Aircraft control ---
    /// Immediate left turn of `dt * turn_speed`. Manual control only.
    TurnLeft { callsign: String },
    /// Immediate right turn of `dt * turn_speed`. Manual control only.
    TurnRight { callsign: String },
    SetAltitudeState {
        callsign: String,
        state: AltitudeState,
    },
    /// Bearing (radians) to hold under manual control.
    SetManualBearing { callsign: String, bearing: f64 },
    ToggleManualControl { callsign: String },
    Land { callsign: String },
    TakeOff { callsign: String },
    /// Replace the waypoint at `stage` of the aircraft's route.
    AlterPath {
        callsign: String,
        stage: usize,
        waypoint: Waypoint,
    },
}

impl OperatorCommand {
    /// Callsign of the aircraft the command targets, if any.
    pub fn callsign(&self) -> Option<&str> {
        match self {
            OperatorCommand::Start | OperatorCommand::Pause | OperatorCommand::Resume => None,
            OperatorCommand::TurnLeft { callsign }
            | OperatorCommand::TurnRight { callsign }
            | OperatorCommand::SetAltitudeState { callsign, .. }
            | OperatorCommand::SetManualBearing { callsign, .. }
            | OperatorCommand::ToggleManualControl { callsign }
            | OperatorCommand::Land { callsign }
            | OperatorCommand::TakeOff { callsign }
            | OperatorCommand::AlterPath { callsign, .. } => Some(callsign),
        }
    }
}
