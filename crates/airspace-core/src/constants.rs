//! Simulation constants and tuning parameters.

/// Default simulation tick rate (Hz).
pub const DEFAULT_TICK_RATE: f64 = 60.0;

// --- Aircraft body ---

/// Aircraft body radius. Two aircraft closer than this (3D) have collided.
pub const BODY_RADIUS: f64 = 16.0;

/// Score every aircraft starts with.
pub const STARTING_SCORE: i32 = 100;

/// Score deducted for each accepted path edit.
pub const PATH_EDIT_PENALTY: i32 = 10;

// --- Steering ---

/// Heading errors below this (radians) are not corrected.
pub const STEERING_EPSILON: f64 = 0.01;

/// Turn magnitude multiplier when the target lies behind the 90 degree line,
/// letting an aircraft break out of a loop around an overshot waypoint.
pub const WIDE_TURN_FACTOR: f64 = 1.75;

// --- Arrival ---

/// Squared horizontal distance under which an aircraft is "at" a point.
pub const ARRIVAL_TOLERANCE_SQ: f64 = 6.0;

// --- Altitude ---

/// Upper cruise band (feet).
pub const UPPER_BAND: f64 = 30_000.0;

/// Lower cruise band (feet).
pub const LOWER_BAND: f64 = 28_000.0;

/// Descent rate while landing (feet/s), ~11 s from the lower band to the ground.
pub const LANDING_DESCENT_RATE: f64 = 2_501.0;

/// Altitude at or under which a landing aircraft has touched down.
pub const TOUCHDOWN_ALTITUDE: f64 = 100.0;

// --- Flight generation ---

/// Minimum base speed of a generated flight (units/s, before difficulty scaling).
pub const BASE_SPEED_MIN: u32 = 32;

/// Number of whole-unit speeds above the minimum a generated flight may get.
pub const BASE_SPEED_SPREAD: u32 = 10;

/// Attempts at drawing an unused callsign before generation gives up for the interval.
pub const CALLSIGN_ATTEMPTS: usize = 1_000;

/// Seconds over which `max_aircraft` flights are generated at the easiest setting.
pub const FLIGHT_GENERATION_PERIOD_SECS: f64 = 30.0;

/// An entry point is unavailable while any aircraft is within this horizontal radius.
pub const ENTRY_CLEARANCE_RADIUS: f64 = 300.0;

/// Maximum number of intermediate waypoints in a generated route.
pub const MAX_ROUTE_HOPS: usize = 3;

/// Carriers used for generated callsigns: (name, tag).
pub const CARRIERS: [(&str, &str); 8] = [
    ("Doge Air", "DG"),
    ("Britaniair", "BA"),
    ("KDT", "KT"),
    ("Canadair", "CA"),
    ("Wandairline", "WZ"),
    ("Wow Such Air", "WW"),
    ("Planet Express", "PX"),
    ("Aerobonia", "AR"),
];

// --- Airspace map ---

/// Default airspace width (units).
pub const DEFAULT_AIRSPACE_WIDTH: f64 = 888.0;

/// Default airspace height (units).
pub const DEFAULT_AIRSPACE_HEIGHT: f64 = 624.0;

/// Arrival rectangle size, centred on the airport location.
pub const ARRIVALS_WIDTH: f64 = 102.0;
pub const ARRIVALS_HEIGHT: f64 = 53.0;

/// Departure rectangle size.
pub const DEPARTURES_WIDTH: f64 = 52.0;
pub const DEPARTURES_HEIGHT: f64 = 37.0;

/// Offset from the airport location to the centre of its departure rectangle.
pub const DEPARTURES_OFFSET_X: f64 = -114.0;
pub const DEPARTURES_OFFSET_Y: f64 = -41.0;

/// Intermediate waypoints as fractions of the airspace size.
pub const AIRSPACE_WAYPOINTS: [(f64, f64); 16] = [
    (0.10, 0.18),
    (0.16, 0.66),
    (0.20, 0.42),
    (0.23, 0.90),
    (0.25, 0.30),
    (0.27, 0.70),
    (0.39, 0.21),
    (0.39, 0.69),
    (0.55, 0.10),
    (0.63, 0.78),
    (0.67, 0.20),
    (0.70, 0.50),
    (0.85, 0.80),
    (0.78, 0.78),
    (0.81, 0.16),
    (0.82, 0.42),
];
