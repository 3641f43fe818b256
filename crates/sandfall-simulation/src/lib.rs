//! Material simulation data and reactions for Sandfall
//!
//! This crate provides the foundational data types for the cell simulation:
//! - Material definitions (MaterialId, MaterialDef, Materials)
//! - Cells (Cell, CellFlags, CHUNK_SIZE)
//! - Chemical reactions (ReactionRegistry, ReactionHandler, ReactionEffect)
//! - The injectable random source (SimRng)

mod cell;
mod materials;
pub mod reactions;
mod rng;

pub use cell::{AMBIENT_TEMPERATURE, CHUNK_SIZE, Cell, CellFlags, INFINITE_LIFE};
pub use materials::{MaterialDef, MaterialId, MaterialTableError, Materials, PhysicalState};
pub use reactions::{
    Explosion, LifeOverride, Participant, ReactionContext, ReactionEffect, ReactionHandler,
    ReactionRegistry, ReactionRule,
};
pub use rng::SimRng;
