//! Steering: bounded per-tick turns toward a target point or a manual bearing.
//!
//! All functions here are pure over the aircraft's components so they can be
//! driven by the steering system, by operator commands, and by tests alike.
//! Turning rotates the horizontal velocity only; speed and vertical rate are
//! never changed.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use airspace_core::components::{Kinematics, Navigation, Performance};
use airspace_core::constants::{STEERING_EPSILON, WIDE_TURN_FACTOR};

/// Wrap an angle into [-pi, pi) by shifting through [0, 2pi).
/// Avoids the discontinuity at the +/-pi seam when differencing bearings.
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Bearing the aircraft is trying to fly.
///
/// Under manual control this is the explicit manual bearing, or the current
/// heading when none is set. Otherwise it is the direction to the target.
pub fn angle_to_target(kinematics: &Kinematics, navigation: &Navigation) -> f64 {
    if navigation.manual_control {
        navigation
            .manual_bearing
            .unwrap_or_else(|| kinematics.bearing())
    } else {
        kinematics.position.bearing_to(navigation.target)
    }
}

/// Signed turn (radians) allowed this tick. Positive turns clockwise on screen.
///
/// The magnitude is `min(|turn_speed * dt|, |error|)`, widened by
/// [`WIDE_TURN_FACTOR`] when the target angle is at or beyond 90 degrees.
/// Errors under [`STEERING_EPSILON`] produce no turn, and `dt == 0` always
/// produces a zero turn.
pub fn turn_command(bearing: f64, target_angle: f64, turn_speed: f64, dt: f64) -> f64 {
    let error = normalize_angle(target_angle - bearing);
    if error.abs() < STEERING_EPSILON {
        return 0.0;
    }

    let mut magnitude = (turn_speed * dt).abs().min(error.abs());
    if target_angle.abs() >= FRAC_PI_2 {
        magnitude *= WIDE_TURN_FACTOR;
    }
    magnitude.copysign(error)
}

/// Rotate the horizontal velocity by `angle` radians.
pub fn turn_by(kinematics: &mut Kinematics, angle: f64) {
    if angle != 0.0 {
        kinematics.velocity = kinematics.velocity.rotate_xy(angle);
    }
}

/// One steering step toward the current target or manual bearing.
/// Returns the turn applied.
pub fn steer(
    kinematics: &mut Kinematics,
    navigation: &Navigation,
    performance: &Performance,
    dt: f64,
) -> f64 {
    let target_angle = angle_to_target(kinematics, navigation);
    let turn = turn_command(kinematics.bearing(), target_angle, performance.turn_speed, dt);
    turn_by(kinematics, turn);
    turn
}
