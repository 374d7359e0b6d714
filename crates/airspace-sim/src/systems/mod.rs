//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when read-only).
//! They own no state; everything lives in components, the airport list, or
//! the engine.

pub mod altitude;
pub mod arrival;
pub mod cleanup;
pub mod departure;
pub mod flight_generator;
pub mod movement;
pub mod separation;
pub mod snapshot;
pub mod steering;
