//! Fundamental geometric and simulation types.

use std::ops::{Add, Sub};

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Point or direction in airspace units.
/// x, y = screen plane, z = altitude in feet (or vertical rate for velocities).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction. A zero-length vector normalizes to zero.
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        if len == 0.0 {
            Self::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Squared 3D distance, altitude included.
    pub fn distance_squared(self, other: Self) -> f64 {
        (other - self).magnitude_squared()
    }

    /// Squared distance in the screen plane, ignoring altitude.
    pub fn horizontal_distance_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Direction of the (x, y) component in radians, `atan2(y, x)`.
    pub fn bearing(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle from this point to `other` in the screen plane.
    pub fn bearing_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Same point with the z component replaced.
    pub fn with_z(self, z: f64) -> Self {
        Self::new(self.x, self.y, z)
    }

    /// Rotate the (x, y) component by `angle` radians, leaving z untouched.
    pub fn rotate_xy(self, angle: f64) -> Self {
        let rotated = DVec2::from_angle(angle).rotate(DVec2::new(self.x, self.y));
        Self::new(rotated.x, rotated.y, self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

/// Axis-aligned rectangle in the screen plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `centre` (z ignored).
    pub fn centred_on(centre: Vector3, width: f64, height: f64) -> Self {
        Self::new(
            centre.x - width / 2.0,
            centre.y - height / 2.0,
            width,
            height,
        )
    }

    /// Inclusive containment test on x/y.
    pub fn contains(&self, point: Vector3) -> bool {
        self.x <= point.x
            && point.x <= self.x + self.width
            && self.y <= point.y
            && point.y <= self.y + self.height
    }

    pub fn centre(&self) -> Vector3 {
        Vector3::new(self.x + self.width / 2.0, self.y + self.height / 2.0, 0.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
