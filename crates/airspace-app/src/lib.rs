//! Airspace host application.
//!
//! Drives the simulation engine either headless for a fixed number of ticks
//! or in real time on a loop thread fed by JSON command lines.

pub mod game_loop;
pub mod headless;
pub mod state;

pub use airspace_core as core;
