//! Kinematic integration system.
//!
//! Updates position from velocity each tick: position += velocity * dt.
//! Velocity z is the vertical rate, so this also moves altitude.

use hecs::World;

use airspace_core::components::{FlightStatus, Kinematics};

/// Integrate every airborne, unfinished aircraft.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (kin, status)) in world.query_mut::<(&mut Kinematics, &FlightStatus)>() {
        if !status.is_active() {
            continue;
        }
        kin.position = kin.position + kin.velocity.scale(dt);
    }
}
