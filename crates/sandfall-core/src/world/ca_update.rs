//! Cellular automata update logic - material movement physics
//!
//! Movement swaps cells inside the `next` buffer, so a cell that moved down
//! could be visited again further along the scan. Rows are processed
//! bottom-to-top with a fresh random direction each row, and every moved
//! cell is flagged so it is not moved twice in one frame.

use super::grid::FrameView;
use super::stats::SimStats;
use crate::config::SimulationConfig;
use crate::simulation::{CellFlags, MaterialId, Materials, PhysicalState, SimRng};

/// Cellular automata updater - handles material movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Run the movement pass over the frame being built
    pub fn update(
        view: &mut FrameView<'_>,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        let width = view.width();

        for y in (0..view.height()).rev() {
            let left_to_right = rng.gen_bool();
            for i in 0..width {
                let x = if left_to_right { i } else { width - 1 - i };
                let index = view.index(x, y);
                let cell = view.next[index];
                if cell.is_empty()
                    || cell.material == MaterialId::Wall
                    || cell.state == PhysicalState::Solid
                    || cell.has_moved()
                {
                    continue;
                }

                let (x, y) = (x as i32, y as i32);
                let moved = if cell.material == MaterialId::Fire {
                    Self::update_fire(view, x, y, materials, config, stats, rng)
                } else {
                    match cell.state {
                        PhysicalState::Powder => {
                            Self::update_powder(view, x, y, materials, stats, rng)
                        }
                        PhysicalState::Liquid => {
                            Self::update_liquid(view, x, y, materials, config, stats, rng)
                        }
                        PhysicalState::Gas => {
                            Self::update_gas(view, x, y, materials, config, stats, rng)
                        }
                        PhysicalState::Solid => false,
                    }
                };

                if !moved {
                    view.next[index].velocity *= config.physics.velocity_damping;
                }
            }
        }
    }

    /// Update fire (rises, flickers sideways)
    pub fn update_fire(
        view: &mut FrameView<'_>,
        x: i32,
        y: i32,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) -> bool {
        // Try to move up
        if Self::try_move(view, x, y, x, y - 1, materials, stats) {
            return true;
        }

        // Try diagonal up (random direction)
        let dx = if rng.gen_bool() { -1 } else { 1 };
        if Self::try_move(view, x, y, x + dx, y - 1, materials, stats) {
            return true;
        }

        // One random sideways step, then slide the other way
        let side = if rng.gen_bool() { -1 } else { 1 };
        if Self::try_move(view, x, y, x + side, y, materials, stats) {
            return true;
        }
        Self::slide(
            view,
            x,
            y,
            -side,
            config.movement.fire_slide_distance,
            materials,
            stats,
        )
    }

    /// Update powder material (falls down, disperses diagonally)
    pub fn update_powder(
        view: &mut FrameView<'_>,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) -> bool {
        // Try to move down
        if Self::try_move(view, x, y, x, y + 1, materials, stats) {
            return true;
        }

        // Try diagonal dispersal (random direction)
        let dx = if rng.gen_bool() { -1 } else { 1 };
        if Self::try_move(view, x, y, x + dx, y + 1, materials, stats) {
            return true;
        }

        // Try opposite diagonal
        Self::try_move(view, x, y, x - dx, y + 1, materials, stats)
    }

    /// Update liquid material (flows down, then diagonally, then sideways)
    pub fn update_liquid(
        view: &mut FrameView<'_>,
        x: i32,
        y: i32,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) -> bool {
        // Try to move down first
        if Self::try_move(view, x, y, x, y + 1, materials, stats) {
            return true;
        }

        // Keep flowing the way we were going, otherwise pick a side
        let vx = view.next[view.index(x as usize, y as usize)].velocity.x;
        let dx = if vx.abs() > config.movement.liquid_inertia_threshold {
            vx.signum() as i32
        } else if rng.gen_bool() {
            -1
        } else {
            1
        };

        if Self::try_move(view, x, y, x + dx, y + 1, materials, stats) {
            return true;
        }
        if Self::try_move(view, x, y, x - dx, y + 1, materials, stats) {
            return true;
        }

        let distance = config.movement.liquid_dispersion;
        Self::slide(view, x, y, dx, distance, materials, stats)
            || Self::slide(view, x, y, -dx, distance, materials, stats)
    }

    /// Update gas material (rises up, disperses)
    pub fn update_gas(
        view: &mut FrameView<'_>,
        x: i32,
        y: i32,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) -> bool {
        if rng.check_probability(config.movement.gas_rise_probability) {
            // Try to move up
            if Self::try_move(view, x, y, x, y - 1, materials, stats) {
                return true;
            }

            // Try diagonal up (random direction)
            let dx = if rng.gen_bool() { -1 } else { 1 };
            if Self::try_move(view, x, y, x + dx, y - 1, materials, stats) {
                return true;
            }

            // Try opposite diagonal
            if Self::try_move(view, x, y, x - dx, y - 1, materials, stats) {
                return true;
            }
        }

        // Horizontal drift
        let dx = if rng.gen_bool() { -1 } else { 1 };
        let distance = config.movement.gas_dispersion;
        Self::slide(view, x, y, dx, distance, materials, stats)
            || Self::slide(view, x, y, -dx, distance, materials, stats)
    }

    /// Whether the cell at (from_x, from_y) may be swapped into (to_x, to_y):
    /// in bounds, and the target is empty or strictly less dense
    pub fn can_move_to(
        view: &FrameView<'_>,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        materials: &Materials,
    ) -> bool {
        let (Some(src), Some(dst)) = (view.try_index(from_x, from_y), view.try_index(to_x, to_y))
        else {
            return false;
        };

        let dst_cell = &view.next[dst];
        dst_cell.is_empty()
            || materials.density(dst_cell.material) < materials.density(view.next[src].material)
    }

    /// Try to move a cell from one position to another
    /// Returns true if the move succeeded
    fn try_move(
        view: &mut FrameView<'_>,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> bool {
        if !Self::can_move_to(view, from_x, from_y, to_x, to_y, materials) {
            return false;
        }
        Self::swap(view, from_x, from_y, to_x, to_y, stats);
        true
    }

    /// Move horizontally as far as possible, up to `distance` cells in direction `dx`.
    /// Stops at the first cell that cannot be entered.
    fn slide(
        view: &mut FrameView<'_>,
        x: i32,
        y: i32,
        dx: i32,
        distance: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> bool {
        let mut reach = None;
        for step in 1..=distance {
            let tx = x + dx * step;
            if !Self::can_move_to(view, x, y, tx, y, materials) {
                break;
            }
            reach = Some(tx);
        }

        match reach {
            Some(tx) => {
                Self::swap(view, x, y, tx, y, stats);
                true
            }
            None => false,
        }
    }

    fn swap(
        view: &mut FrameView<'_>,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        stats: &mut dyn SimStats,
    ) {
        let src = view.index(from_x as usize, from_y as usize);
        let dst = view.index(to_x as usize, to_y as usize);
        view.next.swap(src, dst);
        view.next[dst].flags.insert(CellFlags::MOVED);
        view.mark(src);
        view.mark(dst);
        stats.record_cell_moved();
    }
}
