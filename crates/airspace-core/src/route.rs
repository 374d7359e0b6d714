//! Flight plans: the pre-assigned route an aircraft follows.
//!
//! Routes are plausible rather than optimal. A plan is built once at spawn
//! and afterwards only changes through operator path edits.

use serde::{Deserialize, Serialize};

use crate::map::{Airspace, Waypoint};
use crate::types::Vector3;

/// The route an aircraft follows. Attached to every aircraft entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub origin: Waypoint,
    pub destination: Waypoint,
    /// Intermediate points between origin and destination.
    pub route: Vec<Waypoint>,
    /// Airport index the flight departs from, if it starts grounded.
    pub origin_airport: Option<usize>,
    /// Airport index the flight lands at, if any.
    pub destination_airport: Option<usize>,
}

impl FlightPlan {
    /// Route from `origin` to `destination` through at most `max_hops`
    /// intermediate waypoints of `airspace`.
    ///
    /// Candidates are the non entry/exit waypoints whose projection falls
    /// strictly inside the origin-destination segment. The `max_hops` nearest
    /// to the segment are kept, then ordered along it.
    pub fn build(
        airspace: &Airspace,
        origin: Waypoint,
        destination: Waypoint,
        max_hops: usize,
    ) -> Self {
        let a = origin.location;
        let b = destination.location;
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;

        let mut candidates: Vec<(f64, f64, &Waypoint)> = Vec::new();
        if len_sq > 0.0 {
            for waypoint in airspace.waypoints.iter().filter(|w| !w.entry_or_exit) {
                let p = waypoint.location;
                let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
                if t <= 0.0 || t >= 1.0 {
                    continue;
                }
                let foot = Vector3::new(a.x + t * dx, a.y + t * dy, 0.0);
                candidates.push((p.horizontal_distance_squared(foot), t, waypoint));
            }
        }

        candidates.sort_by(|l, r| l.0.total_cmp(&r.0));
        candidates.truncate(max_hops);
        candidates.sort_by(|l, r| l.1.total_cmp(&r.1));

        let origin_airport = airspace.airport_at(a).filter(|_| origin.entry_or_exit);
        let destination_airport = airspace.airport_at(b).filter(|_| destination.entry_or_exit);

        Self {
            route: candidates.into_iter().map(|(_, _, w)| w.clone()).collect(),
            origin,
            destination,
            origin_airport,
            destination_airport,
        }
    }

    /// Replace the waypoint at `stage`. Returns whether the edit was accepted.
    ///
    /// Entry/exit points are immutable: an entry/exit replacement, or a stage
    /// currently holding one, is rejected, as is a stage past the route end.
    pub fn alter_path(&mut self, stage: usize, waypoint: Waypoint) -> bool {
        if waypoint.entry_or_exit {
            return false;
        }
        match self.route.get_mut(stage) {
            Some(slot) if !slot.entry_or_exit => {
                *slot = waypoint;
                true
            }
            _ => false,
        }
    }

    /// Point an aircraft at `stage` steers toward: the route point, or the
    /// destination once the route is exhausted.
    pub fn target_for_stage(&self, stage: usize) -> Vector3 {
        self.route
            .get(stage)
            .map(|w| w.location)
            .unwrap_or(self.destination.location)
    }

    /// Whether `point` is exactly the destination location.
    pub fn is_destination(&self, point: Vector3) -> bool {
        point == self.destination.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirspaceBounds;

    fn map() -> Airspace {
        Airspace::standard(AirspaceBounds::default())
    }

    #[test]
    fn test_build_orders_route_along_segment() {
        let map = map();
        let origin = map.entry_points[0].clone();
        let destination = map.entry_points[3].clone();
        let plan = FlightPlan::build(&map, origin.clone(), destination.clone(), 3);
        assert!(!plan.route.is_empty());
        assert!(plan.route.len() <= 3);
        assert!(plan.route.iter().all(|w| !w.entry_or_exit));

        let dist = |w: &Waypoint| w.location.horizontal_distance_squared(origin.location);
        for pair in plan.route.windows(2) {
            assert!(dist(&pair[0]) <= dist(&pair[1]), "route must progress away from origin");
        }
        assert_eq!(plan.origin_airport, None);
        assert_eq!(plan.destination_airport, None);
    }

    #[test]
    fn test_build_detects_airports() {
        let map = map();
        let origin = map.airports[0].as_waypoint();
        let destination = map.entry_points[2].clone();
        let plan = FlightPlan::build(&map, origin, destination, 3);
        assert_eq!(plan.origin_airport, Some(0));

        let plan = FlightPlan::build(
            &map,
            map.entry_points[0].clone(),
            map.airports[1].as_waypoint(),
            3,
        );
        assert_eq!(plan.destination_airport, Some(1));
    }

    #[test]
    fn test_build_degenerate_segment_has_empty_route() {
        let map = map();
        let p = map.entry_points[0].clone();
        let plan = FlightPlan::build(&map, p.clone(), p, 3);
        assert!(plan.route.is_empty());
        assert_eq!(plan.target_for_stage(0), plan.destination.location);
    }

    #[test]
    fn test_alter_path_rules() {
        let map = map();
        let mut plan = FlightPlan::build(
            &map,
            map.entry_points[0].clone(),
            map.entry_points[3].clone(),
            3,
        );
        let replacement = map.waypoints[5].clone();
        assert!(plan.alter_path(0, replacement.clone()));
        assert_eq!(plan.route[0], replacement);

        assert!(!plan.alter_path(0, map.entry_points[1].clone()), "entry/exit replacement");
        assert!(!plan.alter_path(plan.route.len(), replacement.clone()), "out of range");

        plan.route[0] = map.entry_points[1].clone();
        assert!(!plan.alter_path(0, replacement), "stage holds an entry/exit point");
    }

    #[test]
    fn test_target_for_stage() {
        let map = map();
        let plan = FlightPlan::build(
            &map,
            map.entry_points[0].clone(),
            map.entry_points[3].clone(),
            3,
        );
        assert_eq!(plan.target_for_stage(0), plan.route[0].location);
        assert_eq!(plan.target_for_stage(plan.route.len()), plan.destination.location);
        assert!(plan.is_destination(plan.target_for_stage(99)));
    }
}
