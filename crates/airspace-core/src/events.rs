//! Events emitted by the simulation for alerting and presentation.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete outcomes of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new flight appeared, airborne at an entry point or grounded at an airport.
    FlightEntered { callsign: String, grounded: bool },
    /// One or more aircraft newly entered a too-near state. Raised once per rising edge.
    SeparationWarning { callsigns: Vec<String> },
    /// Two aircraft overlapped. Terminal for both.
    Collision { first: String, second: String },
    FlightCompleted {
        callsign: String,
        outcome: FlightOutcome,
        score: i32,
    },
    LandingCleared { callsign: String, airport: String },
    TakeOffCleared { callsign: String, airport: String },
    PathAltered {
        callsign: String,
        stage: usize,
        waypoint: String,
        score: i32,
    },
    PhaseChanged { phase: SimPhase },
}

/// The single collision resolved in a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub first: String,
    pub second: String,
}
