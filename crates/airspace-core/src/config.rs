//! Simulation configuration and difficulty profiles.

use std::f64::consts::PI;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Difficulty setting. Every difficulty-dependent number derives from this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                min_separation: 64.0,
                speed_multiplier: 1.0,
                turn_speed: PI / 4.0,
                vertical_speed: 500.0,
                generation_divisor: 1.0,
            },
            Difficulty::Medium => DifficultyProfile {
                min_separation: 96.0,
                speed_multiplier: 2.0,
                turn_speed: PI / 3.0,
                vertical_speed: 300.0,
                generation_divisor: 2.0,
            },
            Difficulty::Hard => DifficultyProfile {
                min_separation: 128.0,
                speed_multiplier: 3.0,
                turn_speed: PI / 2.0,
                vertical_speed: 200.0,
                generation_divisor: 3.0,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            other => Err(ConfigError::InvalidDifficulty(other.to_string())),
        }
    }
}

/// Numbers derived from a difficulty, threaded explicitly into the systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Minimum 3D separation before a warning is raised.
    pub min_separation: f64,
    /// Multiplier applied to the generated base speed.
    pub speed_multiplier: f64,
    /// Maximum steering turn rate (rad/s).
    pub turn_speed: f64,
    /// Climb/descent rate between bands (feet/s).
    pub vertical_speed: f64,
    pub generation_divisor: f64,
}

/// Size of the rectangular airspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirspaceBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for AirspaceBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_AIRSPACE_WIDTH,
            height: DEFAULT_AIRSPACE_HEIGHT,
        }
    }
}

/// Engine configuration. Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the flight generator RNG.
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Fixed tick rate in Hz.
    pub tick_rate: f64,
    /// Flight generation stops while this many aircraft are active.
    pub max_aircraft: usize,
    pub auto_generate_flights: bool,
    pub airspace: AirspaceBounds,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::Easy,
            tick_rate: DEFAULT_TICK_RATE,
            max_aircraft: 5,
            auto_generate_flights: true,
            airspace: AirspaceBounds::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        if self.max_aircraft == 0 {
            return Err(ConfigError::InvalidMaxAircraft);
        }
        let AirspaceBounds { width, height } = self.airspace;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidAirspace);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Unknown difficulty strings are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut raw: serde_json::Value = serde_json::from_str(json)?;
        if let Some(field) = raw.get_mut("difficulty") {
            // Report the offending name rather than serde's generic variant error.
            if let Some(name) = field.as_str() {
                let difficulty: Difficulty = name.parse()?;
                *field = serde_json::to_value(difficulty)?;
            }
        }
        let config: SimConfig = serde_json::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Fixed timestep in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Seconds between flight generation attempts.
    pub fn generation_interval_secs(&self) -> f64 {
        FLIGHT_GENERATION_PERIOD_SECS
            / (self.max_aircraft as f64 * self.profile().generation_divisor)
    }
}
