//! Static airspace map: entry/exit points, intermediate waypoints and airports.

use serde::{Deserialize, Serialize};

use crate::config::AirspaceBounds;
use crate::constants::*;
use crate::types::{Rect, Vector3};

/// A named point aircraft can be routed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub location: Vector3,
    /// Entry/exit points sit on the airspace boundary and can never be edited out of a route.
    pub entry_or_exit: bool,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, location: Vector3, entry_or_exit: bool) -> Self {
        Self {
            name: name.into(),
            location,
            entry_or_exit,
        }
    }
}

/// An airport: a landing destination and a takeoff origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub location: Vector3,
    pub arrivals: Rect,
    pub departures: Rect,
    /// Set while an aircraft is landing on or taking off from this airport.
    pub active: bool,
}

impl Airport {
    pub fn new(name: impl Into<String>, location: Vector3) -> Self {
        let departure_centre = Vector3::new(
            location.x + DEPARTURES_OFFSET_X,
            location.y + DEPARTURES_OFFSET_Y,
            0.0,
        );
        Self {
            name: name.into(),
            location,
            arrivals: Rect::centred_on(location, ARRIVALS_WIDTH, ARRIVALS_HEIGHT),
            departures: Rect::centred_on(departure_centre, DEPARTURES_WIDTH, DEPARTURES_HEIGHT),
            active: false,
        }
    }

    pub fn is_within_arrivals(&self, point: Vector3) -> bool {
        self.arrivals.contains(point)
    }

    pub fn is_within_departures(&self, point: Vector3) -> bool {
        self.departures.contains(point)
    }

    /// Where grounded aircraft wait for takeoff.
    pub fn departure_point(&self) -> Vector3 {
        self.departures.centre()
    }

    /// The airport as a route endpoint.
    pub fn as_waypoint(&self) -> Waypoint {
        Waypoint::new(self.name.clone(), self.location, true)
    }
}

/// The full map for one airspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airspace {
    pub bounds: AirspaceBounds,
    pub entry_points: Vec<Waypoint>,
    pub waypoints: Vec<Waypoint>,
    pub airports: Vec<Airport>,
}

impl Airspace {
    /// The standard map scaled to `bounds`.
    pub fn standard(bounds: AirspaceBounds) -> Self {
        let AirspaceBounds { width, height } = bounds;
        let entry_points = vec![
            Waypoint::new("North West Top Leftonia", Vector3::new(8.0, 8.0, 0.0), true),
            Waypoint::new("100 Acre Woods", Vector3::new(8.0, height - 4.0, 0.0), true),
            Waypoint::new("City of Rightson", Vector3::new(width - 4.0, 8.0, 0.0), true),
            Waypoint::new(
                "South Sea",
                Vector3::new(width - 4.0, height - 4.0, 0.0),
                true,
            ),
        ];
        let waypoints = AIRSPACE_WAYPOINTS
            .iter()
            .enumerate()
            .map(|(i, &(fx, fy))| {
                Waypoint::new(
                    format!("WP{:02}", i + 1),
                    Vector3::new(fx * width, fy * height, 0.0),
                    false,
                )
            })
            .collect();
        let airports = vec![
            Airport::new(
                "Mosgrizzly Airport",
                Vector3::new(width / 7.0, height / 2.0, 0.0),
            ),
            Airport::new(
                "Mosbear Airport",
                Vector3::new(width * 6.0 / 7.0, height / 2.0, 0.0),
            ),
        ];
        Self {
            bounds,
            entry_points,
            waypoints,
            airports,
        }
    }

    /// Whether a position lies outside the flyable area (body radius inset from each edge).
    pub fn is_out_of_airspace(&self, position: Vector3) -> bool {
        let margin = BODY_RADIUS / 2.0;
        position.x < margin
            || position.x > self.bounds.width - margin
            || position.y < margin
            || position.y > self.bounds.height - margin
    }

    /// Index of the airport located exactly at `location`, if any.
    pub fn airport_at(&self, location: Vector3) -> Option<usize> {
        self.airports
            .iter()
            .position(|a| a.location.x == location.x && a.location.y == location.y)
    }

    /// Return all airports to inactive.
    pub fn reset_airports(&mut self) {
        for airport in &mut self.airports {
            airport.active = false;
        }
    }
}
