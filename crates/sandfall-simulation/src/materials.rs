//! Material definitions and registry

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in material IDs
///
/// The raw `u8` value is what the render projection exposes and what
/// `MaterialId::from_raw` decodes. Anything outside the known range decodes
/// to `Empty`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum MaterialId {
    #[default]
    Empty = 0,
    Wall = 1,
    Sand = 2,
    Water = 3,
    Ice = 4,
    Steam = 5,
    Fire = 6,
    Hydrogen = 7,
    Lithium = 8,
    Oil = 9,
    Wood = 10,
    Sodium = 11,
    Co2 = 12,
    OilVapor = 13,
}

impl MaterialId {
    pub const COUNT: usize = 14;

    /// Every id, in raw-value order
    pub const ALL: [MaterialId; Self::COUNT] = [
        MaterialId::Empty,
        MaterialId::Wall,
        MaterialId::Sand,
        MaterialId::Water,
        MaterialId::Ice,
        MaterialId::Steam,
        MaterialId::Fire,
        MaterialId::Hydrogen,
        MaterialId::Lithium,
        MaterialId::Oil,
        MaterialId::Wood,
        MaterialId::Sodium,
        MaterialId::Co2,
        MaterialId::OilVapor,
    ];

    /// Decode a raw id, mapping unknown values to `Empty`
    pub fn from_raw(raw: u8) -> Self {
        Self::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or(MaterialId::Empty)
    }

    #[inline]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == MaterialId::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialId::Empty => "empty",
            MaterialId::Wall => "wall",
            MaterialId::Sand => "sand",
            MaterialId::Water => "water",
            MaterialId::Ice => "ice",
            MaterialId::Steam => "steam",
            MaterialId::Fire => "fire",
            MaterialId::Hydrogen => "hydrogen",
            MaterialId::Lithium => "lithium",
            MaterialId::Oil => "oil",
            MaterialId::Wood => "wood",
            MaterialId::Sodium => "sodium",
            MaterialId::Co2 => "co2",
            MaterialId::OilVapor => "oil_vapor",
        }
    }
}

impl From<u8> for MaterialId {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalState {
    /// Doesn't move (wall, ice, wood)
    Solid,
    /// Falls, piles up (sand)
    Powder,
    /// Flows, seeks level (water, oil)
    Liquid,
    /// Rises, disperses (steam, fire, hydrogen)
    Gas,
}

/// Definition of a material's physical constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub name: String,
    /// Default physical state for freshly placed or transformed cells
    pub state: PhysicalState,

    /// Base color (RGBA)
    pub color: [u8; 4],

    /// Density (kg/m³) - decides who sinks through whom
    pub density: f32,

    // Thermal properties
    /// Specific heat capacity (J/(kg·K)); higher values conduct heat more slowly
    pub specific_heat: f32,
    /// Temperature at which this melts (Celsius)
    #[serde(default)]
    pub melting_point: Option<f32>,
    /// Temperature at which this boils/evaporates
    #[serde(default)]
    pub boiling_point: Option<f32>,
    /// Latent heat of fusion (J/kg)
    #[serde(default)]
    pub latent_heat_fusion: f32,
    /// Latent heat of vaporization (J/kg)
    #[serde(default)]
    pub latent_heat_vaporization: f32,

    /// Flow resistance (liquids). Carried as data, movement does not read it.
    #[serde(default)]
    pub viscosity: f32,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            id: MaterialId::Empty,
            name: "unknown".to_string(),
            state: PhysicalState::Solid,
            color: [255, 0, 255, 255], // Magenta for missing materials
            density: 1000.0,
            specific_heat: 1000.0,
            melting_point: None,
            boiling_point: None,
            latent_heat_fusion: 0.0,
            latent_heat_vaporization: 0.0,
            viscosity: 0.0,
        }
    }
}

/// Problems found while building a material table
#[derive(Debug, Error)]
pub enum MaterialTableError {
    #[error("failed to parse material table: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("material table has no entry for {0:?}")]
    Missing(MaterialId),

    #[error("material {0:?} is defined more than once")]
    Duplicate(MaterialId),

    #[error("material '{name}' has non-positive density {density}")]
    InvalidDensity { name: String, density: f32 },

    #[error("material '{name}' has non-positive specific heat {specific_heat}")]
    InvalidSpecificHeat { name: String, specific_heat: f32 },
}

/// Registry of all materials, indexed by id
#[derive(Clone, Debug)]
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::with_capacity(MaterialId::COUNT),
        };
        materials.register_defaults();
        materials
    }

    /// Build a table from explicit definitions. Every id must appear exactly once.
    pub fn from_defs(defs: Vec<MaterialDef>) -> Result<Self, MaterialTableError> {
        let mut seen = [false; MaterialId::COUNT];
        for def in &defs {
            if std::mem::replace(&mut seen[def.id.index()], true) {
                return Err(MaterialTableError::Duplicate(def.id));
            }
        }
        if let Some(missing) = MaterialId::ALL.iter().find(|id| !seen[id.index()]) {
            return Err(MaterialTableError::Missing(*missing));
        }

        let mut materials = Self {
            materials: Vec::with_capacity(MaterialId::COUNT),
        };
        for def in defs {
            materials.register(def);
        }
        materials.validate()?;
        Ok(materials)
    }

    /// Parse a RON list of `MaterialDef` entries
    pub fn from_ron_str(source: &str) -> Result<Self, MaterialTableError> {
        let defs: Vec<MaterialDef> = ron::from_str(source)?;
        let materials = Self::from_defs(defs)?;
        log::info!("Loaded {} materials from RON", materials.len());
        Ok(materials)
    }

    /// Check the physical constants that the passes divide by or compare against
    pub fn validate(&self) -> Result<(), MaterialTableError> {
        for def in &self.materials {
            if def.density.is_nan() || def.density <= 0.0 {
                return Err(MaterialTableError::InvalidDensity {
                    name: def.name.clone(),
                    density: def.density,
                });
            }
            if def.specific_heat.is_nan() || def.specific_heat <= 0.0 {
                return Err(MaterialTableError::InvalidSpecificHeat {
                    name: def.name.clone(),
                    specific_heat: def.specific_heat,
                });
            }
        }
        Ok(())
    }

    fn register_defaults(&mut self) {
        // Empty cells are air
        self.register(MaterialDef {
            id: MaterialId::Empty,
            name: "air".to_string(),
            state: PhysicalState::Gas,
            color: [0, 0, 0, 0],
            density: 1.2,
            specific_heat: 1005.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Wall,
            name: "wall".to_string(),
            state: PhysicalState::Solid,
            color: [136, 136, 136, 255],
            density: 2500.0,
            specific_heat: 840.0,
            melting_point: Some(1500.0),
            boiling_point: Some(2800.0),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Sand,
            name: "sand".to_string(),
            state: PhysicalState::Powder,
            color: [240, 230, 140, 255],
            density: 1600.0,
            specific_heat: 830.0,
            melting_point: Some(1700.0),
            boiling_point: Some(2230.0),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Water,
            name: "water".to_string(),
            state: PhysicalState::Liquid,
            color: [30, 144, 255, 255],
            density: 1000.0,
            specific_heat: 4186.0,
            melting_point: Some(0.0),
            boiling_point: Some(100.0),
            latent_heat_fusion: 334_000.0,
            latent_heat_vaporization: 2_260_000.0,
            viscosity: 0.001,
        });

        self.register(MaterialDef {
            id: MaterialId::Ice,
            name: "ice".to_string(),
            state: PhysicalState::Solid,
            color: [175, 238, 238, 255],
            density: 917.0,
            specific_heat: 2050.0,
            melting_point: Some(0.0),
            boiling_point: Some(100.0),
            latent_heat_fusion: 334_000.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Steam,
            name: "steam".to_string(),
            state: PhysicalState::Gas,
            color: [245, 245, 245, 200],
            density: 0.6,
            specific_heat: 2080.0,
            melting_point: Some(0.0),
            boiling_point: Some(100.0),
            latent_heat_vaporization: 2_260_000.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Fire,
            name: "fire".to_string(),
            state: PhysicalState::Gas,
            color: [255, 69, 0, 255],
            density: 0.3,
            specific_heat: 1000.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Hydrogen,
            name: "hydrogen".to_string(),
            state: PhysicalState::Gas,
            color: [200, 220, 255, 160],
            density: 0.09,
            specific_heat: 14_300.0,
            ..Default::default()
        });

        // Alkali metals react violently with water
        self.register(MaterialDef {
            id: MaterialId::Lithium,
            name: "lithium".to_string(),
            state: PhysicalState::Solid,
            color: [255, 200, 200, 255],
            density: 534.0,
            specific_heat: 3582.0,
            melting_point: Some(180.5),
            boiling_point: Some(1342.0),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Oil,
            name: "oil".to_string(),
            state: PhysicalState::Liquid,
            color: [80, 70, 50, 255],
            density: 800.0,
            specific_heat: 2000.0,
            viscosity: 0.05,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Wood,
            name: "wood".to_string(),
            state: PhysicalState::Solid,
            color: [139, 69, 19, 255],
            density: 700.0,
            specific_heat: 1700.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Sodium,
            name: "sodium".to_string(),
            state: PhysicalState::Solid,
            color: [192, 192, 192, 255],
            density: 968.0,
            specific_heat: 1230.0,
            melting_point: Some(97.8),
            boiling_point: Some(883.0),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Co2,
            name: "co2".to_string(),
            state: PhysicalState::Gas,
            color: [220, 220, 220, 120],
            density: 1.98,
            specific_heat: 844.0,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::OilVapor,
            name: "oil_vapor".to_string(),
            state: PhysicalState::Gas,
            color: [100, 80, 40, 160],
            density: 0.9,
            specific_heat: 1700.0,
            ..Default::default()
        });
    }

    fn register(&mut self, material: MaterialDef) {
        let id = material.id.index();

        // Ensure vec is large enough
        if self.materials.len() <= id {
            self.materials.resize(id + 1, MaterialDef::default());
        }

        self.materials[id] = material;
    }

    /// Get material definition by ID
    pub fn get(&self, id: MaterialId) -> &MaterialDef {
        self.materials
            .get(id.index())
            .unwrap_or(&self.materials[0])
    }

    /// Get material definition by raw ID, unknown values resolve to `Empty`
    pub fn get_raw(&self, raw: u8) -> &MaterialDef {
        self.get(MaterialId::from_raw(raw))
    }

    #[inline]
    pub fn density(&self, id: MaterialId) -> f32 {
        self.get(id).density
    }

    #[inline]
    pub fn default_state(&self, id: MaterialId) -> PhysicalState {
        self.get(id).state
    }

    /// Get color for a material
    pub fn get_color(&self, id: MaterialId) -> [u8; 4] {
        self.get(id).color
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Serialize the table in the same format `from_ron_str` reads
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(&self.materials, ron::ser::PrettyConfig::default())
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
