//! Departure release: frees an airport once its departing aircraft has
//! cleared the departure area.

use hecs::World;
use tracing::debug;

use airspace_core::components::{FlightIdentity, FlightStatus, Kinematics};
use airspace_core::enums::DeparturePhase;
use airspace_core::map::Airport;
use airspace_core::route::FlightPlan;

pub fn run(world: &mut World, airports: &mut [Airport]) {
    for (_entity, (identity, kin, status, plan)) in world.query_mut::<(
        &FlightIdentity,
        &Kinematics,
        &mut FlightStatus,
        &FlightPlan,
    )>() {
        if status.departure != DeparturePhase::Departing {
            continue;
        }
        let Some(airport) = plan.origin_airport.and_then(|idx| airports.get_mut(idx)) else {
            status.departure = DeparturePhase::Airborne;
            continue;
        };
        if !airport.is_within_departures(kin.position) {
            status.departure = DeparturePhase::Airborne;
            airport.active = false;
            debug!(callsign = %identity.callsign, airport = %airport.name, "departure complete");
        }
    }
}
