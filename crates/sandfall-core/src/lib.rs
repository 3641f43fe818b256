//! Frame-stepped falling-sand simulation
//!
//! A fixed grid of cells is advanced one frame at a time through an ordered
//! set of passes: chemistry, heat conduction, phase changes, forces,
//! lifetimes and movement. See [`world::World`] for the entry point.

pub mod config;
pub mod simulation;
pub mod world;

pub use config::{ConfigError, SimulationConfig};
pub use world::World;
