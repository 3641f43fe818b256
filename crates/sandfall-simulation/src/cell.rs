//! Cell types and constants
//!
//! Foundational per-position state for the grid simulation.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{MaterialId, Materials, PhysicalState};

/// Size of an active-region chunk in cells (16x16)
pub const CHUNK_SIZE: usize = 16;

/// Temperature of freshly created and empty cells (Celsius)
pub const AMBIENT_TEMPERATURE: f32 = 20.0;

/// Lifetime sentinel: the cell never expires
pub const INFINITE_LIFE: i32 = -1;

bitflags! {
    /// Transient per-frame markers, cleared at frame start
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Already moved this frame
        const MOVED = 1 << 0;
        /// Took part in a reaction this frame
        const REACTED = 1 << 1;
    }
}

/// A single cell in the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Material type (Empty = air)
    pub material: MaterialId,
    /// Celsius. Empty cells carry the ambient air temperature.
    pub temperature: f32,
    /// Usually the material default; reactions and phase changes may override it
    pub state: PhysicalState,
    /// Cells per frame, +y points down
    pub velocity: Vec2,
    /// Accumulated latent energy. Reset on placement, otherwise carried untouched.
    pub latent_heat: f32,
    /// Frames remaining; `INFINITE_LIFE` never expires, 0 means remove
    pub life: i32,
    #[serde(skip)]
    pub flags: CellFlags,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        material: MaterialId::Empty,
        temperature: AMBIENT_TEMPERATURE,
        state: PhysicalState::Gas,
        velocity: Vec2::ZERO,
        latent_heat: 0.0,
        life: INFINITE_LIFE,
        flags: CellFlags::empty(),
    };

    /// Fresh cell of `material` at ambient temperature with its default state
    pub fn new(material: MaterialId, materials: &Materials) -> Self {
        Self {
            material,
            state: materials.default_state(material),
            ..Self::EMPTY
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }

    #[inline]
    pub fn has_infinite_life(&self) -> bool {
        self.life == INFINITE_LIFE
    }

    /// Swap material and re-derive the physical state from the table.
    /// Temperature, velocity and lifetime are left alone.
    pub fn set_material(&mut self, material: MaterialId, materials: &Materials) {
        self.material = material;
        self.state = materials.default_state(material);
    }

    /// Turn this cell back into empty air, keeping its temperature
    pub fn clear(&mut self) {
        self.material = MaterialId::Empty;
        self.state = PhysicalState::Gas;
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.flags.contains(CellFlags::MOVED)
    }

    #[inline]
    pub fn has_reacted(&self) -> bool {
        self.flags.contains(CellFlags::REACTED)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
