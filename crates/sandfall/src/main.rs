use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sandfall::{AppConfig, Scene};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON configuration file (default: ./sandfall.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RON material table replacing the built-in one
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for the simulation's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Starting layout
    #[arg(long, value_enum)]
    scene: Option<Scene>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;

    // Command-line flags win over every configuration layer
    if let Some(materials) = args.materials {
        config.run.materials = Some(materials);
    }
    if let Some(frames) = args.frames {
        config.run.frames = frames;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(scene) = args.scene {
        config.run.scene = scene;
    }

    log::info!(
        "Starting Sandfall: {}x{} grid, {:?} scene, {} frames, seed {:#x}",
        config.simulation.width,
        config.simulation.height,
        config.run.scene,
        config.run.frames,
        config.simulation.seed
    );

    sandfall::run(&config).context("Simulation run failed")?;
    Ok(())
}
