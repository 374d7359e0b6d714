//! Airspace snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::enums::*;
use crate::events::{CollisionReport, SimEvent};
use crate::types::{SimTime, Vector3};

/// Complete state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirspaceSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub difficulty: Difficulty,
    pub aircraft: Vec<AircraftView>,
    pub airports: Vec<AirportView>,
    pub events: Vec<SimEvent>,
    /// Set on the tick a collision was resolved.
    pub collision: Option<CollisionReport>,
    pub score: ScoreView,
}

/// One aircraft as presentation sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub callsign: String,
    pub carrier: String,
    pub position: Vector3,
    /// Heading (radians, `atan2(vy, vx)`).
    pub bearing: f64,
    /// Altitude (feet).
    pub altitude: f64,
    pub speed: f64,
    pub altitude_state: AltitudeState,
    pub route_stage: usize,
    pub target: Vector3,
    pub destination: String,
    pub manual_control: bool,
    pub waiting_to_land: bool,
    pub landing: bool,
    pub grounded: bool,
    pub holding: bool,
    pub finished: bool,
    pub score: i32,
    pub too_near: Vec<String>,
    pub out_of_airspace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportView {
    pub name: String,
    pub location: Vector3,
    pub active: bool,
}

/// Session score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    /// Sum of the scores of every completed flight.
    pub total: i64,
    pub flights_completed: u32,
    pub collisions: u32,
}
