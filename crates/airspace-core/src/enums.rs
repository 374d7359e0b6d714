//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete altitude transition state, driven toward one of the cruise bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeState {
    Climbing,
    #[default]
    Level,
    Falling,
}

/// Arrival side of the flight lifecycle. The phases are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproachPhase {
    /// Heading for a non-airport exit; finishes on arrival.
    #[default]
    Enroute,
    /// Heading for an airport; holds at the destination until cleared to land.
    AwaitingClearance,
    /// Cleared to land: descending toward the ground, ignoring band clamps.
    Descending,
}

/// Departure side of the flight lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeparturePhase {
    /// Parked at an airport's departure point, waiting for takeoff clearance.
    Grounded,
    /// Airborne but still inside the origin airport's departure area.
    Departing,
    #[default]
    Airborne,
}

/// How a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightOutcome {
    /// Reached a non-airport destination.
    Exited,
    /// Completed a landing descent.
    Landed,
    /// Collided with another aircraft.
    Collided,
}

/// Manual turn direction for operator turn pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Sign of the rotation applied to the velocity vector.
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        }
    }
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Standby,
    Active,
    Paused,
    /// A collision ended the session. Ticks no longer advance.
    GameOver,
}
