//! Simulation engine for the airspace.
//!
//! Owns the hecs ECS world, runs the aircraft systems at a fixed tick rate,
//! detects separation breaches and collisions, and produces
//! `AirspaceSnapshot`s for the host.

pub mod controls;
pub mod engine;
pub mod steering;
pub mod systems;
pub mod world_setup;

pub use airspace_core as core;
pub use engine::SimulationEngine;
pub use world_setup::FlightSpec;
