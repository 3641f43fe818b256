//! Simulation tuning constants
//!
//! Every number the passes use lives here so a run can be retuned from a
//! config file without recompiling. Defaults reproduce the stock behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::MaterialTableError;

/// Problems with a configuration or material table handed to `World`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimensions { width: usize, height: usize },

    #[error("{name} must be within [0, 1] (got {value})")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("fire lifetime range [{min}, {max}) is empty")]
    EmptyFireLifeRange { min: i32, max: i32 },

    #[error(transparent)]
    Materials(#[from] MaterialTableError),
}

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Seed for the default world RNG
    pub seed: u64,
    pub physics: PhysicsConfig,
    pub heat: HeatConfig,
    pub movement: MovementConfig,
    pub fire: FireConfig,
    pub explosion: ExplosionConfig,
    pub placement: PlacementConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            seed: 0x5A4D_FA11,
            physics: PhysicsConfig::default(),
            heat: HeatConfig::default(),
            movement: MovementConfig::default(),
            fire: FireConfig::default(),
            explosion: ExplosionConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

/// Gravity and velocity integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame, scaled by relative density
    pub gravity: f32,
    /// Density that neither sinks nor rises (kg/m³)
    pub air_density: f32,
    /// Divisor turning a density difference into a gravity multiplier
    pub density_scale: f32,
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
    /// Velocity multiplier for cells that could not move this frame
    pub velocity_damping: f32,
    /// Horizontal push given to a liquid that cannot fall
    pub liquid_spread_impulse: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            air_density: 1.2,
            density_scale: 1000.0,
            max_velocity_x: 3.0,
            max_velocity_y: 5.0,
            velocity_damping: 0.8,
            liquid_spread_impulse: 0.5,
        }
    }
}

/// Heat conduction and reaction heat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    /// Relaxation rate for a material with specific heat 1000 J/(kg·K)
    pub conduction_base: f32,
    /// Temperature change that marks a region active
    pub change_threshold: f32,
    /// Degrees per joule of reaction heat
    pub reaction_heat_scale: f32,
    /// Add the conduction change on top of `next` instead of overwriting it,
    /// so heat from this frame's reactions survives conduction
    pub keep_frame_heat: bool,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            conduction_base: 0.05,
            change_threshold: 0.1,
            reaction_heat_scale: 1e-3,
            keep_frame_heat: false,
        }
    }
}

/// Cell exchange distances and chances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// How far a blocked liquid may slide sideways in one frame
    pub liquid_dispersion: i32,
    /// How far a gas may drift sideways in one frame
    pub gas_dispersion: i32,
    /// How far fire may slide sideways once it cannot rise
    pub fire_slide_distance: i32,
    /// Chance per frame that a gas tries to rise
    pub gas_rise_probability: f32,
    /// Horizontal speed above which a liquid keeps flowing the way it was going
    pub liquid_inertia_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            liquid_dispersion: 4,
            gas_dispersion: 3,
            fire_slide_distance: 3,
            gas_rise_probability: 0.7,
            liquid_inertia_threshold: 0.1,
        }
    }
}

/// Fire spreading into hot air
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Chance per frame that a fire cell tries to spread
    pub spread_probability: f32,
    /// A fire needs more than this many frames left to spread
    pub min_spread_life: i32,
    /// Air must be hotter than this (Celsius) to catch
    pub spread_min_temperature: f32,
    /// Fixed frames subtracted from the parent's lifetime
    pub spread_life_penalty: i32,
    /// Additional random frames subtracted, uniform in `[0, jitter)`
    pub spread_life_jitter: i32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            spread_probability: 1.0 / 3.0,
            min_spread_life: 10,
            spread_min_temperature: 80.0,
            spread_life_penalty: 5,
            spread_life_jitter: 6,
        }
    }
}

/// Radial blast effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Degrees added per unit of blast strength
    pub heat_per_strength: f32,
    /// Blast strength needed before solids and powders can be destroyed
    pub destroy_threshold: f32,
    /// Destruction chance per unit of blast strength
    pub destroy_chance_per_strength: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            heat_per_strength: 50.0,
            destroy_threshold: 0.5,
            destroy_chance_per_strength: 0.3,
        }
    }
}

/// Initial conditions for placed cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub fire_temperature: f32,
    /// Placed fire lives uniformly in `[fire_life_min, fire_life_max)` frames
    pub fire_life_min: i32,
    pub fire_life_max: i32,
    pub ice_temperature: f32,
    pub steam_temperature: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            fire_temperature: 150.0,
            fire_life_min: 30,
            fire_life_max: 60,
            ice_temperature: -10.0,
            steam_temperature: 110.0,
        }
    }
}

impl SimulationConfig {
    /// Smaller grid with otherwise default settings
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Reject settings the passes cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let unit_range = [
            ("physics.velocity_damping", self.physics.velocity_damping),
            (
                "movement.gas_rise_probability",
                self.movement.gas_rise_probability,
            ),
            ("fire.spread_probability", self.fire.spread_probability),
        ];
        for (name, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }

        let positive = [
            ("physics.density_scale", self.physics.density_scale),
            ("physics.max_velocity_x", self.physics.max_velocity_x),
            ("physics.max_velocity_y", self.physics.max_velocity_y),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.placement.fire_life_max <= self.placement.fire_life_min
            || self.placement.fire_life_min <= 0
        {
            return Err(ConfigError::EmptyFireLifeRange {
                min: self.placement.fire_life_min,
                max: self.placement.fire_life_max,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 300);
        assert_eq!(config.physics.gravity, 0.3);
        assert_eq!(config.physics.velocity_damping, 0.8);
        assert_eq!(config.heat.conduction_base, 0.05);
        assert_eq!(config.placement.fire_temperature, 150.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = SimulationConfig::with_size(0, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_bad_damping_rejected() {
        let mut config = SimulationConfig::default();
        config.physics.velocity_damping = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { name: "physics.velocity_damping", .. })
        ));
    }

    #[test]
    fn test_empty_fire_life_range_rejected() {
        let mut config = SimulationConfig::default();
        config.placement.fire_life_max = config.placement.fire_life_min;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyFireLifeRange { .. })
        ));
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: SimulationConfig =
            ron::from_str("(width: 64, physics: (gravity: 0.5))").unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 300);
        assert_eq!(config.physics.gravity, 0.5);
        assert_eq!(config.physics.max_velocity_y, 5.0);
    }
}
