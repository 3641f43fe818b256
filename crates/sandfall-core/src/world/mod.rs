//! World management - grid storage and the frame pipeline

mod ca_update;
mod chemistry_system;
mod grid;
mod special_behaviors_system;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use ca_update::CellularAutomataUpdater;
pub use chemistry_system::ChemistrySystem;
pub use grid::{ActiveRegions, DoubleBuffer, FrameView, Grid};
pub use special_behaviors_system::SpecialBehaviorsSystem;
pub use stats::{FrameStats, NoopStats, SimStats};
pub use world::World;
