//! Separation and collision detection.
//!
//! Runs once per tick, strictly after all motion. Every unordered pair of
//! active aircraft is evaluated once using 3D distance (altitude counts).
//! Inside the body radius is a collision, terminal for both aircraft; the
//! first collision found ends the scan, so at most one is resolved per tick.
//! Inside the minimum separation puts each aircraft in the other's
//! too-near set.

use hecs::{Entity, World};

use airspace_core::components::{FlightIdentity, FlightStatus, Kinematics, SeparationStatus};
use airspace_core::constants::BODY_RADIUS;
use airspace_core::enums::FlightOutcome;
use airspace_core::events::CollisionReport;
use airspace_core::types::Vector3;

/// Result of a pairwise scan over a list of positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// For each input index, the indices within minimum separation.
    pub too_near: Vec<Vec<usize>>,
    /// First colliding pair found, `(i, j)` with `i < j`.
    pub collision: Option<(usize, usize)>,
}

/// Pairwise O(n^2) scan. Both comparisons are strict, so a pair exactly at
/// the body radius has not collided.
pub fn scan(positions: &[Vector3], min_separation: f64) -> ScanResult {
    let body_sq = BODY_RADIUS * BODY_RADIUS;
    let separation_sq = min_separation * min_separation;
    let mut result = ScanResult {
        too_near: vec![Vec::new(); positions.len()],
        collision: None,
    };

    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let distance_sq = positions[i].distance_squared(positions[j]);
            if distance_sq < body_sq {
                result.collision = Some((i, j));
                return result;
            }
            if distance_sq < separation_sq {
                result.too_near[i].push(j);
                result.too_near[j].push(i);
            }
        }
    }
    result
}

/// What one separation pass produced.
#[derive(Debug, Clone, Default)]
pub struct SeparationOutcome {
    /// Callsigns whose too-near set became non-empty this tick (rising edge).
    pub newly_warned: Vec<String>,
    pub collision: Option<CollisionReport>,
}

/// Rebuild every aircraft's too-near set, latch warnings, and resolve the
/// first collision by finishing both aircraft.
pub fn run(world: &mut World, min_separation: f64) -> SeparationOutcome {
    let mut aircraft: Vec<(Entity, String, Vector3)> = Vec::new();
    for (entity, (identity, kin, status, separation)) in world.query_mut::<(
        &FlightIdentity,
        &Kinematics,
        &FlightStatus,
        &mut SeparationStatus,
    )>() {
        separation.too_near.clear();
        if status.is_active() {
            aircraft.push((entity, identity.callsign.clone(), kin.position));
        }
    }

    let positions: Vec<Vector3> = aircraft.iter().map(|(_, _, p)| *p).collect();
    let result = scan(&positions, min_separation);

    let mut outcome = SeparationOutcome::default();
    for (idx, (entity, callsign, _)) in aircraft.iter().enumerate() {
        let Ok(separation) = world.query_one_mut::<&mut SeparationStatus>(*entity) else {
            continue;
        };
        separation.too_near = result.too_near[idx]
            .iter()
            .map(|&peer| aircraft[peer].1.clone())
            .collect();
        if separation.too_near.is_empty() {
            separation.warning_latched = false;
        } else if !separation.warning_latched {
            separation.warning_latched = true;
            outcome.newly_warned.push(callsign.clone());
        }
    }

    if let Some((i, j)) = result.collision {
        for &idx in &[i, j] {
            if let Ok(status) = world.query_one_mut::<&mut FlightStatus>(aircraft[idx].0) {
                status.outcome = Some(FlightOutcome::Collided);
            }
        }
        let report = CollisionReport {
            first: aircraft[i].1.clone(),
            second: aircraft[j].1.clone(),
        };
        outcome.collision = Some(report);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn test_collision_boundary_is_strict() {
        let exact = scan(&[at(0.0, 0.0, 28_000.0), at(16.0, 0.0, 28_000.0)], 64.0);
        assert_eq!(exact.collision, None);
        assert_eq!(exact.too_near, vec![vec![1], vec![0]]);

        let closer = scan(&[at(0.0, 0.0, 28_000.0), at(15.0, 0.0, 28_000.0)], 64.0);
        assert_eq!(closer.collision, Some((0, 1)));
    }

    #[test]
    fn test_altitude_separates() {
        let result = scan(&[at(0.0, 0.0, 28_000.0), at(0.0, 0.0, 30_000.0)], 128.0);
        assert_eq!(result.collision, None);
        assert!(result.too_near.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_first_collision_short_circuits() {
        let result = scan(
            &[
                at(0.0, 0.0, 0.0),
                at(1.0, 0.0, 0.0),
                at(500.0, 0.0, 0.0),
                at(501.0, 0.0, 0.0),
            ],
            64.0,
        );
        assert_eq!(result.collision, Some((0, 1)));
    }

    #[test]
    fn test_separation_is_symmetric() {
        let result = scan(
            &[at(0.0, 0.0, 0.0), at(50.0, 0.0, 0.0), at(90.0, 0.0, 0.0)],
            64.0,
        );
        assert_eq!(result.too_near[0], vec![1]);
        assert_eq!(result.too_near[1], vec![0, 2]);
        assert_eq!(result.too_near[2], vec![1]);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(scan(&[], 64.0), ScanResult::default());
        let single = scan(&[at(1.0, 1.0, 1.0)], 64.0);
        assert_eq!(single.too_near, vec![Vec::<usize>::new()]);
    }
}
