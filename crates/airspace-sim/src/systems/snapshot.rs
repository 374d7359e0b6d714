//! Snapshot system: queries the ECS world and builds a complete AirspaceSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use airspace_core::components::*;
use airspace_core::config::Difficulty;
use airspace_core::enums::SimPhase;
use airspace_core::events::{CollisionReport, SimEvent};
use airspace_core::map::Airspace;
use airspace_core::route::FlightPlan;
use airspace_core::state::*;
use airspace_core::types::SimTime;

/// Inputs that live outside the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: SimPhase,
    pub difficulty: Difficulty,
    pub airspace: &'a Airspace,
    pub score: &'a ScoreView,
}

pub fn build_snapshot(
    world: &World,
    context: SnapshotContext<'_>,
    events: Vec<SimEvent>,
    collision: Option<CollisionReport>,
) -> AirspaceSnapshot {
    AirspaceSnapshot {
        time: context.time,
        phase: context.phase,
        difficulty: context.difficulty,
        aircraft: build_aircraft(world, context.airspace),
        airports: build_airports(context.airspace),
        events,
        collision,
        score: context.score.clone(),
    }
}

/// Aircraft views sorted by callsign for stable output.
pub fn build_aircraft(world: &World, airspace: &Airspace) -> Vec<AircraftView> {
    let mut query = world.query::<(
        &FlightIdentity,
        &Kinematics,
        &Navigation,
        &FlightStatus,
        &FlightScore,
        &SeparationStatus,
        &FlightPlan,
    )>();
    let mut aircraft: Vec<AircraftView> = query
        .iter()
        .map(
            |(_, (identity, kin, nav, status, score, separation, plan))| AircraftView {
                callsign: identity.callsign.clone(),
                carrier: identity.carrier.clone(),
                position: kin.position,
                bearing: kin.bearing(),
                altitude: kin.position.z,
                speed: kin.speed(),
                altitude_state: status.altitude_state,
                route_stage: nav.route_stage,
                target: nav.target,
                destination: plan.destination.name.clone(),
                manual_control: nav.manual_control,
                waiting_to_land: status.is_waiting_to_land(),
                landing: status.is_landing(),
                grounded: status.is_grounded(),
                holding: status.holding,
                finished: status.is_finished(),
                score: score.points,
                too_near: separation.too_near.clone(),
                out_of_airspace: airspace.is_out_of_airspace(kin.position),
            },
        )
        .collect();
    aircraft.sort_by(|a, b| a.callsign.cmp(&b.callsign));
    aircraft
}

fn build_airports(airspace: &Airspace) -> Vec<AirportView> {
    airspace
        .airports
        .iter()
        .map(|airport| AirportView {
            name: airport.name.clone(),
            location: airport.location,
            active: airport.active,
        })
        .collect()
}
