//! Arrival detection and route advancement.

use hecs::World;

use airspace_core::components::{FlightStatus, Kinematics, Navigation};
use airspace_core::constants::ARRIVAL_TOLERANCE_SQ;
use airspace_core::enums::{ApproachPhase, FlightOutcome};
use airspace_core::map::Airport;
use airspace_core::route::FlightPlan;
use airspace_core::types::Vector3;

/// Whether `position` is "at" `point`: horizontal squared distance under the
/// tolerance. Deliberately tight, since waypoints are small.
pub fn is_at(position: Vector3, point: Vector3) -> bool {
    position.horizontal_distance_squared(point) < ARRIVAL_TOLERANCE_SQ
}

/// Whether the aircraft has reached its destination: inside the arrival
/// rectangle for an airport, otherwise "at" the destination point.
pub fn is_at_destination(position: Vector3, plan: &FlightPlan, airports: &[Airport]) -> bool {
    match plan.destination_airport.and_then(|idx| airports.get(idx)) {
        Some(airport) => airport.is_within_arrivals(position),
        None => is_at(position, plan.destination.location),
    }
}

/// One arrival check for a single aircraft.
///
/// At the destination a non-airport flight exits; an airport flight holds
/// until cleared to land and only finishes through the landing descent.
/// Reaching an intermediate target advances the route stage.
pub fn check(
    kinematics: &Kinematics,
    navigation: &mut Navigation,
    status: &mut FlightStatus,
    plan: &FlightPlan,
    airports: &[Airport],
) {
    status.holding = false;

    if plan.is_destination(navigation.target) && is_at_destination(kinematics.position, plan, airports)
    {
        match status.approach {
            ApproachPhase::Enroute => status.outcome = Some(FlightOutcome::Exited),
            ApproachPhase::AwaitingClearance => status.holding = true,
            ApproachPhase::Descending => {}
        }
    } else if is_at(kinematics.position, navigation.target) {
        navigation.route_stage += 1;
        navigation.target = plan.target_for_stage(navigation.route_stage);
    }
}

pub fn run(world: &mut World, airports: &[Airport]) {
    for (_entity, (kin, nav, status, plan)) in world.query_mut::<(
        &Kinematics,
        &mut Navigation,
        &mut FlightStatus,
        &FlightPlan,
    )>() {
        if !status.is_active() {
            continue;
        }
        check(kin, nav, status, plan, airports);
    }
}
