//! ECS components for hecs entities.
//!
//! Components are plain data structs. Behaviour lives in the engine's
//! systems and steering functions, not here.

use serde::{Deserialize, Serialize};

use crate::constants::STARTING_SCORE;
use crate::enums::*;
use crate::types::Vector3;

/// Who the aircraft is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightIdentity {
    /// Unique callsign, e.g. "DG042".
    pub callsign: String,
    /// Carrier name the callsign tag belongs to.
    pub carrier: String,
}

/// Position and velocity. Velocity z is the vertical rate, not a horizontal component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl Kinematics {
    /// Heading derived from the horizontal velocity, `atan2(vy, vx)`.
    pub fn bearing(&self) -> f64 {
        self.velocity.bearing()
    }

    /// Horizontal speed. Steering never changes it.
    pub fn speed(&self) -> f64 {
        self.velocity.with_z(0.0).magnitude()
    }
}

/// Difficulty-derived rates, fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Maximum turn rate (rad/s).
    pub turn_speed: f64,
    /// Climb/descent rate between bands (feet/s).
    pub vertical_speed: f64,
}

/// Steering target and manual override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    /// Point currently steered toward.
    pub target: Vector3,
    /// Index into the flight plan route; equal to the route length once
    /// the destination is the target.
    pub route_stage: usize,
    pub manual_control: bool,
    /// Explicit bearing held under manual control. `None` holds the current heading.
    pub manual_bearing: Option<f64>,
}

/// Lifecycle flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightStatus {
    pub altitude_state: AltitudeState,
    pub approach: ApproachPhase,
    pub departure: DeparturePhase,
    /// Set once the flight is over. Finished aircraft take no part in motion or separation.
    pub outcome: Option<FlightOutcome>,
    /// At the destination airport, waiting for landing clearance.
    pub holding: bool,
}

impl FlightStatus {
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_grounded(&self) -> bool {
        self.departure == DeparturePhase::Grounded
    }

    pub fn is_landing(&self) -> bool {
        self.approach == ApproachPhase::Descending
    }

    pub fn is_waiting_to_land(&self) -> bool {
        self.approach == ApproachPhase::AwaitingClearance
    }

    /// Moving aircraft that the separation scan must consider.
    pub fn is_active(&self) -> bool {
        !self.is_finished() && !self.is_grounded()
    }
}

/// Per-aircraft running score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightScore {
    pub points: i32,
}

impl Default for FlightScore {
    fn default() -> Self {
        Self {
            points: STARTING_SCORE,
        }
    }
}

/// Ephemeral separation state, rebuilt by every separation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparationStatus {
    /// Callsigns of peers inside the minimum separation this tick.
    pub too_near: Vec<String>,
    /// Rising-edge latch: set when a warning is raised, cleared when `too_near` empties.
    pub warning_latched: bool,
}
