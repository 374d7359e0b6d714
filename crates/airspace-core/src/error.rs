//! Error types surfaced to hosts.
//!
//! Expected simulation outcomes (collisions, separation warnings, rejected
//! path edits) are not errors and never appear here.

use thiserror::Error;

/// Invalid or unreadable simulation configuration. Always fatal at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid difficulty: {0:?} (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("tick rate must be finite and positive, got {0}")]
    InvalidTickRate(f64),

    #[error("max_aircraft must be at least 1")]
    InvalidMaxAircraft,

    #[error("airspace width and height must be positive")]
    InvalidAirspace,

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Engine-level failures for host calls that name something that does not exist.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("no active aircraft with callsign {0}")]
    UnknownAircraft(String),

    #[error("callsign {0} is already in use")]
    DuplicateCallsign(String),

    #[error("no airport with index {0}")]
    UnknownAirport(usize),

    #[error("invalid flight {callsign}: {reason}")]
    InvalidFlight { callsign: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
