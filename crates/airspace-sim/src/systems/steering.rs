//! Steering system: one bounded turn per aircraft per tick.

use hecs::World;

use airspace_core::components::{FlightStatus, Kinematics, Navigation, Performance};

use crate::steering;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (kin, nav, perf, status)) in world.query_mut::<(
        &mut Kinematics,
        &Navigation,
        &Performance,
        &FlightStatus,
    )>() {
        if !status.is_active() {
            continue;
        }
        steering::steer(kin, nav, perf, dt);
    }
}
