//! Core types and definitions for the airspace simulation.
//!
//! This crate defines the vocabulary shared across the engine and its hosts:
//! vector math, components, operator commands, events, snapshots, map data,
//! configuration and error types. It has no dependency on any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod map;
pub mod route;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
