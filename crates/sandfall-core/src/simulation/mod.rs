//! Simulation systems - heat, phase changes, forces

pub mod forces;
pub mod state_changes;
pub mod temperature;

// Re-export the data crate so callers only need sandfall-core
pub use sandfall_simulation::{
    AMBIENT_TEMPERATURE, CHUNK_SIZE, Cell, CellFlags, Explosion, INFINITE_LIFE, LifeOverride,
    MaterialDef, MaterialId, MaterialTableError, Materials, Participant, PhysicalState,
    ReactionContext, ReactionEffect, ReactionHandler, ReactionRegistry, ReactionRule, SimRng,
    reactions,
};

pub use forces::ForceIntegrator;
pub use state_changes::StateChangeSystem;
pub use temperature::HeatConduction;
