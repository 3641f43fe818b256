//! # Sandfall - headless falling-sand runner
//!
//! Builds a world from layered configuration, lays out a scene and steps it
//! for a fixed number of frames.

pub mod config;
pub mod scenes;

use std::path::Path;

use anyhow::{Context, Result};
use sandfall_core::simulation::{Materials, ReactionRegistry};
use sandfall_core::world::FrameStats;
use sandfall_core::World;

pub use crate::config::{AppConfig, RunConfig};
pub use scenes::Scene;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub particles: usize,
    pub stats: FrameStats,
}

/// Read a RON material table from disk
pub fn load_materials(path: &Path) -> Result<Materials> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read material table {}", path.display()))?;
    Materials::from_ron_str(&source)
        .with_context(|| format!("Invalid material table {}", path.display()))
}

/// Create the world described by `config`
pub fn build_world(config: &AppConfig) -> Result<World> {
    let materials = match &config.run.materials {
        Some(path) => {
            let materials = load_materials(path)?;
            log::info!("Loaded {} materials from {}", materials.len(), path.display());
            materials
        }
        None => Materials::new(),
    };

    World::with_tables(
        config.simulation.clone(),
        materials,
        ReactionRegistry::with_default_reactions(),
    )
    .context("Failed to create world")
}

/// Populate the configured scene and step through every frame
pub fn run(config: &AppConfig) -> Result<RunSummary> {
    let mut world = build_world(config)?;
    config.run.scene.populate(&mut world);

    for _ in 0..config.run.frames {
        world.step();

        let frame = world.frame();
        if config.run.report_every > 0 && frame % config.run.report_every == 0 {
            let stats = world.last_frame_stats();
            log::info!(
                "Frame {}: {} particles, {} moves, {} reactions, {} explosions",
                frame,
                world.particle_count(),
                stats.cells_moved,
                stats.reactions,
                stats.explosions
            );
        }
    }

    let summary = RunSummary {
        frames: world.frame(),
        particles: world.particle_count(),
        stats: *world.total_stats(),
    };
    log::info!(
        "Finished {} frames: {} particles left, {} reactions, {} explosions, {} cells destroyed, {} state changes, {} expired, {} fire spreads",
        summary.frames,
        summary.particles,
        summary.stats.reactions,
        summary.stats.explosions,
        summary.stats.cells_destroyed,
        summary.stats.state_changes,
        summary.stats.cells_expired,
        summary.stats.fire_spreads
    );
    Ok(summary)
}
