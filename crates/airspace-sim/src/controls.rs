//! Operator actions on a single aircraft.
//!
//! Each function returns whether the action was accepted. Rejected actions
//! leave every component untouched; they are not errors.

use airspace_core::components::*;
use airspace_core::constants::*;
use airspace_core::enums::*;
use airspace_core::map::{Airport, Waypoint};
use airspace_core::route::FlightPlan;

use crate::steering;

/// Immediate turn pulse of `turn_speed * dt`, bypassing the steering algorithm.
/// Only aircraft under manual control respond; the manual bearing is dropped
/// so the aircraft holds whatever heading the pulse leaves it on.
pub fn turn(
    kinematics: &mut Kinematics,
    navigation: &mut Navigation,
    performance: &Performance,
    direction: TurnDirection,
    dt: f64,
) -> bool {
    if !navigation.manual_control {
        return false;
    }
    steering::turn_by(kinematics, direction.sign() * performance.turn_speed * dt);
    navigation.manual_bearing = None;
    true
}

/// Request a climb, descent or level-off.
///
/// Climbing is only accepted below the upper band and falling only above the
/// lower band. Levelling off is only accepted on a band, so a transition
/// always runs until `settle` snaps it onto the next band.
pub fn set_altitude_state(
    kinematics: &mut Kinematics,
    status: &mut FlightStatus,
    state: AltitudeState,
) -> bool {
    if status.is_landing() {
        return false;
    }
    let z = kinematics.position.z;
    let allowed = match state {
        AltitudeState::Climbing => z < UPPER_BAND,
        AltitudeState::Falling => z > LOWER_BAND,
        AltitudeState::Level => z == LOWER_BAND || z == UPPER_BAND,
    };
    if !allowed {
        return false;
    }
    status.altitude_state = state;
    if state == AltitudeState::Level {
        kinematics.velocity.z = 0.0;
    }
    true
}

/// Store the bearing to hold under manual control. Wrapped into [-pi, pi).
pub fn set_manual_bearing(navigation: &mut Navigation, bearing: f64) -> bool {
    if !bearing.is_finite() {
        return false;
    }
    navigation.manual_bearing = Some(steering::normalize_angle(bearing));
    true
}

/// Retarget the current route point and re-steer with a zero-length step.
pub fn reset_bearing(
    kinematics: &mut Kinematics,
    navigation: &mut Navigation,
    plan: &FlightPlan,
    performance: &Performance,
) {
    if let Some(point) = plan.route.get(navigation.route_stage) {
        navigation.target = point.location;
    }
    steering::steer(kinematics, navigation, performance, 0.0);
}

/// Flip manual control. Engaging captures the current heading so the
/// aircraft does not snap; releasing hands it back to its route.
/// Manual control is forced off during the landing descent.
pub fn toggle_manual_control(
    kinematics: &mut Kinematics,
    navigation: &mut Navigation,
    status: &FlightStatus,
    plan: &FlightPlan,
    performance: &Performance,
) -> bool {
    if status.is_landing() {
        navigation.manual_control = false;
        navigation.manual_bearing = None;
        return false;
    }
    navigation.manual_control = !navigation.manual_control;
    if navigation.manual_control {
        navigation.manual_bearing = Some(kinematics.bearing());
    } else {
        navigation.manual_bearing = None;
        reset_bearing(kinematics, navigation, plan, performance);
    }
    true
}

/// Clear an aircraft to land at its destination airport.
///
/// Requires the aircraft to be awaiting clearance, to be targeting the
/// destination, and the airport to be free.
pub fn land(
    kinematics: &mut Kinematics,
    navigation: &mut Navigation,
    status: &mut FlightStatus,
    plan: &FlightPlan,
    airports: &mut [Airport],
) -> bool {
    if !status.is_waiting_to_land() || !plan.is_destination(navigation.target) {
        return false;
    }
    let Some(airport) = plan
        .destination_airport
        .and_then(|idx| airports.get_mut(idx))
    else {
        return false;
    };
    if airport.active {
        return false;
    }

    airport.active = true;
    status.approach = ApproachPhase::Descending;
    status.holding = false;
    navigation.manual_control = false;
    navigation.manual_bearing = None;
    kinematics.velocity.z = 0.0;
    true
}

/// Release a grounded aircraft. The origin airport stays active until the
/// aircraft clears its departure area.
pub fn take_off(status: &mut FlightStatus, plan: &FlightPlan, airports: &mut [Airport]) -> bool {
    if !status.is_grounded() {
        return false;
    }
    let Some(airport) = plan.origin_airport.and_then(|idx| airports.get_mut(idx)) else {
        return false;
    };
    if airport.active {
        return false;
    }
    airport.active = true;
    status.departure = DeparturePhase::Departing;
    true
}

/// Replace the waypoint at `stage` of the route. An accepted edit costs
/// [`PATH_EDIT_PENALTY`] points and retargets at once when it changes the
/// stage being flown.
pub fn alter_path(
    kinematics: &mut Kinematics,
    navigation: &mut Navigation,
    plan: &mut FlightPlan,
    score: &mut FlightScore,
    performance: &Performance,
    stage: usize,
    waypoint: Waypoint,
) -> bool {
    let location = waypoint.location;
    if !plan.alter_path(stage, waypoint) {
        return false;
    }
    score.points -= PATH_EDIT_PENALTY;
    if !navigation.manual_control {
        reset_bearing(kinematics, navigation, plan, performance);
    }
    if stage == navigation.route_stage {
        navigation.target = location;
    }
    true
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use airspace_core::config::AirspaceBounds;
    use airspace_core::map::Airspace;
    use airspace_core::types::Vector3;

    const PERF: Performance = Performance {
        turn_speed: PI / 4.0,
        vertical_speed: 500.0,
    };

    fn setup() -> (Airspace, FlightPlan, Kinematics, Navigation) {
        let map = Airspace::standard(AirspaceBounds::default());
        let plan = FlightPlan::build(
            &map,
            map.entry_points[0].clone(),
            map.entry_points[3].clone(),
            3,
        );
        let kin = Kinematics {
            position: map.entry_points[0].location.with_z(28_000.0),
            velocity: Vector3::new(40.0, 0.0, 0.0),
        };
        let nav = Navigation {
            target: plan.target_for_stage(0),
            ..Default::default()
        };
        (map, plan, kin, nav)
    }

    #[test]
    fn test_turn_requires_manual_control() {
        let (_, _, mut kin, mut nav) = setup();
        let before = kin;
        assert!(!turn(&mut kin, &mut nav, &PERF, TurnDirection::Left, 0.1));
        assert_eq!(kin, before);

        nav.manual_control = true;
        nav.manual_bearing = Some(1.0);
        assert!(turn(&mut kin, &mut nav, &PERF, TurnDirection::Right, 0.1));
        assert!((kin.bearing() - PI / 4.0 * 0.1).abs() < 1e-12);
        assert_eq!(nav.manual_bearing, None);
        assert!((kin.speed() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_altitude_state_rules() {
        let (_, _, mut kin, _) = setup();
        let mut status = FlightStatus::default();
        assert!(!set_altitude_state(&mut kin, &mut status, AltitudeState::Falling));
        assert!(set_altitude_state(&mut kin, &mut status, AltitudeState::Climbing));
        assert_eq!(status.altitude_state, AltitudeState::Climbing);

        kin.velocity.z = 500.0;
        assert!(set_altitude_state(&mut kin, &mut status, AltitudeState::Level));
        assert_eq!(kin.velocity.z, 0.0);

        status.approach = ApproachPhase::Descending;
        assert!(!set_altitude_state(&mut kin, &mut status, AltitudeState::Climbing));
    }

    #[test]
    fn test_level_rejected_between_bands() {
        let (_, _, mut kin, _) = setup();
        let mut status = FlightStatus::default();
        assert!(set_altitude_state(&mut kin, &mut status, AltitudeState::Climbing));

        kin.position.z = 29_000.0;
        kin.velocity.z = 500.0;
        assert!(!set_altitude_state(&mut kin, &mut status, AltitudeState::Level));
        assert_eq!(status.altitude_state, AltitudeState::Climbing);
        assert_eq!(kin.velocity.z, 500.0);

        kin.position.z = UPPER_BAND;
        assert!(set_altitude_state(&mut kin, &mut status, AltitudeState::Level));
        assert_eq!(kin.velocity.z, 0.0);
    }

    #[test]
    fn test_toggle_manual_captures_bearing_and_restores_route() {
        let (_, plan, mut kin, mut nav) = setup();
        let status = FlightStatus::default();
        kin.velocity = Vector3::new(0.0, 40.0, 0.0);

        assert!(toggle_manual_control(&mut kin, &mut nav, &status, &plan, &PERF));
        assert!(nav.manual_control);
        assert_eq!(nav.manual_bearing, Some(kin.bearing()));

        nav.target = Vector3::new(1.0, 1.0, 0.0);
        let before = kin;
        assert!(toggle_manual_control(&mut kin, &mut nav, &status, &plan, &PERF));
        assert!(!nav.manual_control);
        assert_eq!(nav.manual_bearing, None);
        assert_eq!(nav.target, plan.route[0].location, "retargets the current route point");
        assert_eq!(kin, before, "zero-length re-steer does not turn");
    }

    #[test]
    fn test_toggle_manual_blocked_while_landing() {
        let (_, plan, mut kin, mut nav) = setup();
        nav.manual_control = true;
        let status = FlightStatus {
            approach: ApproachPhase::Descending,
            ..Default::default()
        };
        assert!(!toggle_manual_control(&mut kin, &mut nav, &status, &plan, &PERF));
        assert!(!nav.manual_control);
    }

    #[test]
    fn test_set_manual_bearing_wraps() {
        let mut nav = Navigation::default();
        assert!(set_manual_bearing(&mut nav, 3.0 * PI / 2.0));
        assert!((nav.manual_bearing.unwrap() + PI / 2.0).abs() < 1e-12);
        assert!(!set_manual_bearing(&mut nav, f64::NAN));
    }

    #[test]
    fn test_land_gate() {
        let (mut map, _, mut kin, mut nav) = setup();
        let plan = FlightPlan::build(
            &map,
            map.entry_points[0].clone(),
            map.airports[0].as_waypoint(),
            3,
        );
        let mut status = FlightStatus {
            approach: ApproachPhase::AwaitingClearance,
            ..Default::default()
        };

        nav.target = plan.target_for_stage(0);
        if !plan.route.is_empty() {
            assert!(
                !land(&mut kin, &mut nav, &mut status, &plan, &mut map.airports),
                "not yet targeting the airport"
            );
        }

        nav.target = plan.destination.location;
        map.airports[0].active = true;
        assert!(!land(&mut kin, &mut nav, &mut status, &plan, &mut map.airports));

        map.airports[0].active = false;
        nav.manual_control = true;
        kin.velocity.z = 300.0;
        assert!(land(&mut kin, &mut nav, &mut status, &plan, &mut map.airports));
        assert!(status.is_landing());
        assert!(!status.is_waiting_to_land());
        assert!(!nav.manual_control);
        assert_eq!(kin.velocity.z, 0.0);
        assert!(map.airports[0].active);

        assert!(
            !land(&mut kin, &mut nav, &mut status, &plan, &mut map.airports),
            "already landing"
        );
    }

    #[test]
    fn test_take_off_gate() {
        let mut map = Airspace::standard(AirspaceBounds::default());
        let plan = FlightPlan::build(
            &map,
            map.airports[1].as_waypoint(),
            map.entry_points[0].clone(),
            3,
        );
        let mut status = FlightStatus {
            departure: DeparturePhase::Grounded,
            ..Default::default()
        };
        map.airports[1].active = true;
        assert!(!take_off(&mut status, &plan, &mut map.airports));
        map.airports[1].active = false;
        assert!(take_off(&mut status, &plan, &mut map.airports));
        assert_eq!(status.departure, DeparturePhase::Departing);
        assert!(map.airports[1].active);
        assert!(!take_off(&mut status, &plan, &mut map.airports));
    }

    #[test]
    fn test_alter_path_scoring() {
        let (map, mut plan, mut kin, mut nav) = setup();
        let mut score = FlightScore::default();
        let replacement = map.waypoints[0].clone();

        assert!(!alter_path(
            &mut kin,
            &mut nav,
            &mut plan,
            &mut score,
            &PERF,
            0,
            map.entry_points[2].clone()
        ));
        assert_eq!(score.points, 100, "entry/exit edits are free no-ops");

        assert!(alter_path(
            &mut kin,
            &mut nav,
            &mut plan,
            &mut score,
            &PERF,
            0,
            replacement.clone()
        ));
        assert_eq!(score.points, 90);
        assert_eq!(nav.target, replacement.location);
    }

    #[test]
    fn test_alter_later_stage_keeps_target() {
        let (map, mut plan, mut kin, mut nav) = setup();
        assert!(plan.route.len() > 1);
        let mut score = FlightScore::default();
        let current = nav.target;
        assert!(alter_path(
            &mut kin,
            &mut nav,
            &mut plan,
            &mut score,
            &PERF,
            1,
            map.waypoints[0].clone()
        ));
        assert_eq!(nav.target, current);
        assert_eq!(plan.route[1], map.waypoints[0]);
    }
}
