//! Altitude controller: band transitions and the landing descent.
//!
//! Split around movement integration. `command` sets the vertical rate
//! before aircraft move, and `settle` snaps onto a band (or touches down)
//! afterwards, so an altitude never reads past a band in a snapshot.

use hecs::World;

use airspace_core::components::{FlightStatus, Kinematics, Performance};
use airspace_core::constants::*;
use airspace_core::enums::{AltitudeState, FlightOutcome};
use airspace_core::map::Airport;
use airspace_core::route::FlightPlan;

/// Vertical rate for a band transition at altitude `z`.
pub fn vertical_rate(state: AltitudeState, z: f64, vertical_speed: f64) -> f64 {
    match state {
        AltitudeState::Climbing if z < UPPER_BAND => vertical_speed,
        AltitudeState::Falling if z > LOWER_BAND => -vertical_speed,
        _ => 0.0,
    }
}

/// Set each aircraft's vertical rate from its altitude state, or the fixed
/// descent rate while landing.
pub fn command(world: &mut World) {
    for (_entity, (kin, status, perf)) in
        world.query_mut::<(&mut Kinematics, &FlightStatus, &Performance)>()
    {
        if !status.is_active() {
            continue;
        }
        kin.velocity.z = if status.is_landing() {
            -LANDING_DESCENT_RATE
        } else {
            vertical_rate(status.altitude_state, kin.position.z, perf.vertical_speed)
        };
    }
}

/// Snap transitions that reached their band, and finish landings that
/// reached the ground (freeing the airport).
pub fn settle(world: &mut World, airports: &mut [Airport]) {
    for (_entity, (kin, status, plan)) in
        world.query_mut::<(&mut Kinematics, &mut FlightStatus, &FlightPlan)>()
    {
        if !status.is_active() {
            continue;
        }

        if status.is_landing() {
            if kin.position.z <= TOUCHDOWN_ALTITUDE {
                kin.position.z = kin.position.z.max(0.0);
                kin.velocity.z = 0.0;
                status.outcome = Some(FlightOutcome::Landed);
                if let Some(airport) = plan
                    .destination_airport
                    .and_then(|idx| airports.get_mut(idx))
                {
                    airport.active = false;
                }
            }
            continue;
        }

        let band = match status.altitude_state {
            AltitudeState::Climbing if kin.position.z >= UPPER_BAND => UPPER_BAND,
            AltitudeState::Falling if kin.position.z <= LOWER_BAND => LOWER_BAND,
            _ => continue,
        };
        kin.position.z = band;
        kin.velocity.z = 0.0;
        status.altitude_state = AltitudeState::Level;
    }
}
