//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sandfall.ron` in the working directory (if it exists), or the file
//!    passed with `--config` (must exist)
//! 3. Environment variables prefixed with `SANDFALL_`
//!
//! Example environment variable: `SANDFALL_SIMULATION__WIDTH=200`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use sandfall_core::SimulationConfig;
use serde::{Deserialize, Serialize};

use crate::scenes::Scene;

/// Everything the runner needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Headless run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate
    pub frames: u64,
    /// Initial layout of the grid
    pub scene: Scene,
    /// Log a progress line every this many frames (0 disables)
    pub report_every: u64,
    /// RON material table replacing the built-in one
    pub materials: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            scene: Scene::Showcase,
            report_every: 100,
            materials: None,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority.
    ///
    /// With `path` the file is required; without it `sandfall.ron` is used
    /// when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .context("Failed to serialize default configuration")?;

        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("sandfall")
                .format(FileFormat::Ron)
                .required(false),
        };

        let config = Config::builder()
            // Layer 1: Compiled defaults
            .add_source(defaults)
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (SANDFALL_RUN__FRAMES, etc.)
            .add_source(
                Environment::with_prefix("SANDFALL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.width, 400);
        assert_eq!(config.simulation.height, 300);
        assert_eq!(config.run.frames, 600);
        assert_eq!(config.run.scene, Scene::Showcase);
        assert!(config.run.materials.is_none());
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"(
                simulation: (width: 64, height: 48, seed: 99),
                run: (frames: 12, scene: "combustion"),
            )"#
        )
        .expect("write config");

        let config = AppConfig::load(Some(file.path())).expect("Failed to load config");
        assert_eq!(config.simulation.width, 64);
        assert_eq!(config.simulation.height, 48);
        assert_eq!(config.simulation.seed, 99);
        assert_eq!(config.run.frames, 12);
        assert_eq!(config.run.scene, Scene::Combustion);
        // Untouched values keep their defaults
        assert_eq!(config.run.report_every, 100);
        assert_eq!(config.simulation.physics.gravity, 0.3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.ron");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
