//! State change system
//!
//! Handles the water triad transitions based on temperature:
//! - Melting (ice → water)
//! - Boiling (water → steam)
//! - Freezing (water → ice)
//! - Condensing (steam → water)
//!
//! Only these three materials change phase. Other materials carry melting and
//! boiling points in the table but stay put.

use crate::simulation::{Cell, MaterialId, Materials};
use crate::world::{FrameView, SimStats};

/// System for checking and applying state changes
pub struct StateChangeSystem;

impl StateChangeSystem {
    /// Check if a cell should change phase based on its temperature
    ///
    /// Thresholds come from the cell's own material. Returns true if the cell
    /// was transformed to a different material.
    pub fn check_state_change(cell: &mut Cell, materials: &Materials) -> bool {
        let def = materials.get(cell.material);
        let temperature = cell.temperature;

        let target = match cell.material {
            MaterialId::Ice => def
                .melting_point
                .filter(|&melt| temperature > melt)
                .map(|_| MaterialId::Water),
            MaterialId::Water => {
                if def.boiling_point.is_some_and(|boil| temperature >= boil) {
                    Some(MaterialId::Steam)
                } else if def.melting_point.is_some_and(|melt| temperature <= melt) {
                    Some(MaterialId::Ice)
                } else {
                    None
                }
            }
            MaterialId::Steam => def
                .boiling_point
                .filter(|&boil| temperature < boil)
                .map(|_| MaterialId::Water),
            _ => None,
        };

        match target {
            Some(material) => {
                cell.set_material(material, materials);
                true
            }
            None => false,
        }
    }

    /// Apply phase changes to every cell of the frame being built
    pub fn update(view: &mut FrameView<'_>, materials: &Materials, stats: &mut dyn SimStats) {
        for index in 0..view.next.len() {
            if Self::check_state_change(&mut view.next[index], materials) {
                view.mark(index);
                stats.record_state_change();
            }
        }
    }
}
