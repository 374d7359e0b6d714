//! Entity spawn factories.
//!
//! Builds aircraft entities from a fully specified `FlightSpec`, and draws
//! random specs for periodic flight generation.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use airspace_core::components::*;
use airspace_core::config::DifficultyProfile;
use airspace_core::constants::*;
use airspace_core::enums::*;
use airspace_core::error::SimError;
use airspace_core::map::{Airspace, Waypoint};
use airspace_core::route::FlightPlan;
use airspace_core::types::Vector3;

/// Everything needed to put one aircraft into the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSpec {
    pub callsign: String,
    pub carrier: String,
    pub origin: Waypoint,
    pub destination: Waypoint,
    /// Speed before the difficulty multiplier (units/s).
    pub base_speed: f64,
    /// Starting altitude (feet).
    pub altitude: f64,
}

impl FlightSpec {
    /// Reject flights the systems cannot fly: speed must be finite and
    /// positive, and the flight must start on a cruise band.
    pub fn validate(&self) -> Result<(), SimError> {
        let reason = if !self.base_speed.is_finite() || self.base_speed <= 0.0 {
            format!("base speed {} must be finite and positive", self.base_speed)
        } else if self.altitude != LOWER_BAND && self.altitude != UPPER_BAND {
            format!(
                "altitude {} is not a cruise band ({LOWER_BAND} or {UPPER_BAND})",
                self.altitude
            )
        } else {
            return Ok(());
        };
        Err(SimError::InvalidFlight {
            callsign: self.callsign.clone(),
            reason,
        })
    }
}

/// Spawn an aircraft. A flight whose origin is an airport starts grounded at
/// that airport's departure point.
pub fn spawn_flight(
    world: &mut World,
    airspace: &Airspace,
    spec: FlightSpec,
    profile: &DifficultyProfile,
) -> Entity {
    let plan = FlightPlan::build(airspace, spec.origin, spec.destination, MAX_ROUTE_HOPS);

    let start = plan
        .origin_airport
        .and_then(|idx| airspace.airports.get(idx))
        .map(|airport| airport.departure_point())
        .unwrap_or(plan.origin.location);
    let position = start.with_z(spec.altitude);

    let target = plan.target_for_stage(0);
    let heading = Vector3::new(target.x - position.x, target.y - position.y, 0.0).normalize();
    let velocity = heading.scale(spec.base_speed * profile.speed_multiplier);

    let status = FlightStatus {
        departure: if plan.origin_airport.is_some() {
            DeparturePhase::Grounded
        } else {
            DeparturePhase::Airborne
        },
        approach: if plan.destination_airport.is_some() {
            ApproachPhase::AwaitingClearance
        } else {
            ApproachPhase::Enroute
        },
        ..Default::default()
    };

    world.spawn((
        FlightIdentity {
            callsign: spec.callsign,
            carrier: spec.carrier,
        },
        Kinematics { position, velocity },
        Performance {
            turn_speed: profile.turn_speed,
            vertical_speed: profile.vertical_speed,
        },
        Navigation {
            target,
            ..Default::default()
        },
        status,
        FlightScore::default(),
        SeparationStatus::default(),
        plan,
    ))
}

/// Whether any aircraft in the world already uses `callsign`.
pub fn callsign_in_use(world: &World, callsign: &str) -> bool {
    world
        .query::<&FlightIdentity>()
        .iter()
        .any(|(_, identity)| identity.callsign == callsign)
}

/// Entry points a new flight can appear at: nothing is heading for them and
/// no airborne aircraft is within the clearance radius.
pub fn available_entry_points<'a>(world: &World, airspace: &'a Airspace) -> Vec<&'a Waypoint> {
    let clearance_sq = ENTRY_CLEARANCE_RADIUS * ENTRY_CLEARANCE_RADIUS;
    let mut query = world.query::<(&Kinematics, &Navigation, &FlightStatus)>();
    let aircraft: Vec<(Vector3, Vector3)> = query
        .iter()
        .filter(|(_, (_, _, status))| status.is_active())
        .map(|(_, (kin, nav, _))| (kin.position, nav.target))
        .collect();

    airspace
        .entry_points
        .iter()
        .filter(|entry| {
            aircraft.iter().all(|&(position, target)| {
                target != entry.location
                    && position.horizontal_distance_squared(entry.location) > clearance_sq
            })
        })
        .collect()
}

/// Draw a random flight. Returns `None` when there is nowhere fair to spawn.
pub fn generate_flight(
    world: &World,
    airspace: &Airspace,
    rng: &mut ChaCha8Rng,
) -> Option<FlightSpec> {
    let entries = available_entry_points(world, airspace);

    let (origin, from_airport) = if entries.is_empty() {
        if airspace.airports.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..airspace.airports.len());
        let occupied = world
            .query::<(&FlightStatus, &FlightPlan)>()
            .iter()
            .any(|(_, (status, plan))| status.is_grounded() && plan.origin_airport == Some(idx));
        if occupied {
            return None;
        }
        (airspace.airports[idx].as_waypoint(), true)
    } else {
        (entries[rng.gen_range(0..entries.len())].clone(), false)
    };

    let airport_names: Vec<&str> = airspace.airports.iter().map(|a| a.name.as_str()).collect();
    let destinations: Vec<Waypoint> = airspace
        .entry_points
        .iter()
        .cloned()
        .chain(airspace.airports.iter().map(|a| a.as_waypoint()))
        .filter(|d| d.name != origin.name)
        .filter(|d| !(from_airport && airport_names.contains(&d.name.as_str())))
        .collect();
    if destinations.is_empty() {
        return None;
    }
    let destination = destinations[rng.gen_range(0..destinations.len())].clone();

    let (carrier, tag) = CARRIERS[rng.gen_range(0..CARRIERS.len())];
    let callsign = (0..CALLSIGN_ATTEMPTS)
        .map(|_| format!("{tag}{:03}", rng.gen_range(1..=999)))
        .find(|name| !callsign_in_use(world, name))?;

    let base_speed = f64::from(BASE_SPEED_MIN + rng.gen_range(0..BASE_SPEED_SPREAD));
    let altitude = if rng.gen_bool(0.5) {
        LOWER_BAND
    } else {
        UPPER_BAND
    };

    Some(FlightSpec {
        callsign,
        carrier: carrier.to_string(),
        origin,
        destination,
        base_speed,
        altitude,
    })
}
