//! Heat conduction
//!
//! Every cell relaxes toward the average temperature of its von Neumann
//! neighbors. Materials with a high specific heat change temperature more
//! slowly. Empty cells conduct too; air is part of the temperature field.

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

use crate::config::HeatConfig;
use crate::simulation::{Cell, Materials};
use crate::world::FrameView;

/// Heat conduction pass
pub struct HeatConduction;

impl HeatConduction {
    /// Fraction of the gap to the neighbor average closed in one frame
    #[inline]
    pub fn conduction_rate(base: f32, specific_heat: f32) -> f32 {
        (base / (specific_heat / 1000.0)).clamp(0.0, 1.0)
    }

    /// Conduct heat for one frame.
    ///
    /// Neighbor averages come from `current` and the interpolated temperature
    /// is written to `next`. With `keep_frame_heat` the change is added to
    /// `next` instead. Returns the number of cells whose temperature moved by
    /// more than the threshold.
    pub fn update(view: &mut FrameView<'_>, materials: &Materials, config: &HeatConfig) -> usize {
        let width = view.width();
        let height = view.height();
        let current = view.current;

        let conduct_row = |(y, row): (usize, &mut [Cell])| -> Vec<usize> {
            let mut changed = Vec::new();
            for (x, cell) in row.iter_mut().enumerate() {
                let before = current[y * width + x].temperature;
                let Some(average) = Self::neighbor_average(current, width, height, x, y) else {
                    continue;
                };
                let rate = Self::conduction_rate(
                    config.conduction_base,
                    materials.get(current[y * width + x].material).specific_heat,
                );
                let delta = (average - before) * rate;
                if config.keep_frame_heat {
                    cell.temperature += delta;
                } else {
                    cell.temperature = before + delta;
                }
                if delta.abs() > config.change_threshold {
                    changed.push(x);
                }
            }
            changed
        };

        #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
        let changed_rows: Vec<Vec<usize>> = view
            .next
            .par_chunks_mut(width)
            .enumerate()
            .map(conduct_row)
            .collect();

        #[cfg(not(all(feature = "parallel", not(target_arch = "wasm32"))))]
        let changed_rows: Vec<Vec<usize>> = view
            .next
            .chunks_mut(width)
            .enumerate()
            .map(conduct_row)
            .collect();

        let mut changed = 0;
        for (y, xs) in changed_rows.into_iter().enumerate() {
            changed += xs.len();
            for x in xs {
                view.regions.mark(x, y);
            }
        }
        changed
    }

    /// Mean temperature of the in-bounds orthogonal neighbors
    fn neighbor_average(
        cells: &[Cell],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
    ) -> Option<f32> {
        let mut sum = 0.0;
        let mut count = 0;

        for (dx, dy) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;

            if (0..width as i32).contains(&nx) && (0..height as i32).contains(&ny) {
                sum += cells[ny as usize * width + nx as usize].temperature;
                count += 1;
            }
        }

        (count > 0).then(|| sum / count as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::MaterialId;
    use crate::world::Grid;

    fn hot_spot_grid(material: MaterialId) -> Grid {
        let materials = Materials::new();
        let mut grid = Grid::new(5, 5);
        let mut hot = Cell::new(material, &materials);
        hot.temperature = 520.0;
        grid.set(2, 2, hot);
        grid
    }

    #[test]
    fn test_conduction_rate() {
        assert!((HeatConduction::conduction_rate(0.05, 1000.0) - 0.05).abs() < 1e-6);
        // Water conducts slower than air
        assert!(
            HeatConduction::conduction_rate(0.05, 4186.0)
                < HeatConduction::conduction_rate(0.05, 1005.0)
        );
        // Tiny specific heats never overshoot
        assert_eq!(HeatConduction::conduction_rate(0.05, 1.0), 1.0);
    }

    #[test]
    fn test_hot_spot_cools_and_neighbors_warm() {
        let materials = Materials::new();
        let mut grid = hot_spot_grid(MaterialId::Fire);
        grid.begin_frame();
        let changed = HeatConduction::update(&mut grid.frame(), &materials, &HeatConfig::default());

        // Fire: rate 0.05, gap 500 → -25
        assert!((grid.next_cell(2, 2).unwrap().temperature - 495.0).abs() < 1e-3);
        // Air neighbor: average (520 + 3*20)/4 = 145, gap 125, rate 0.05/1.005
        let neighbor = grid.next_cell(2, 1).unwrap().temperature;
        assert!(neighbor > 20.0 && neighbor < 145.0);
        // Diagonal cells see no change
        assert_eq!(grid.next_cell(1, 1).unwrap().temperature, 20.0);
        assert_eq!(changed, 5);
    }

    #[test]
    fn test_never_overshoots_neighbor_average() {
        let materials = Materials::new();
        let mut grid = hot_spot_grid(MaterialId::Hydrogen);
        grid.begin_frame();
        HeatConduction::update(&mut grid.frame(), &materials, &HeatConfig::default());

        for y in 0..5 {
            for x in 0..5 {
                let before = grid.cell(x, y).unwrap().temperature;
                let after = grid.next_cell(x, y).unwrap().temperature;
                let average = HeatConduction::neighbor_average(
                    grid.cells(),
                    5,
                    5,
                    x as usize,
                    y as usize,
                )
                .unwrap();
                let (lo, hi) = if before < average {
                    (before, average)
                } else {
                    (average, before)
                };
                assert!(after >= lo - 1e-4 && after <= hi + 1e-4);
            }
        }
    }

    #[test]
    fn test_uniform_field_is_stable() {
        let materials = Materials::new();
        let mut grid = Grid::new(6, 4);
        grid.begin_frame();
        let changed = HeatConduction::update(&mut grid.frame(), &materials, &HeatConfig::default());
        assert_eq!(changed, 0);
        assert!(grid.next_cells().iter().all(|c| c.temperature == 20.0));
    }

    fn warmed_center_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        grid.begin_frame();
        {
            let view = grid.frame();
            let i = view.index(1, 1);
            view.next[i].temperature += 15.0;
        }
        grid
    }

    #[test]
    fn test_writes_interpolated_temperature_over_next() {
        let materials = Materials::new();
        let mut grid = warmed_center_grid();
        HeatConduction::update(&mut grid.frame(), &materials, &HeatConfig::default());
        // Current field was uniform, so the center relaxes back to 20
        assert_eq!(grid.next_cell(1, 1).unwrap().temperature, 20.0);
    }

    #[test]
    fn test_keep_frame_heat_adds_on_top() {
        let materials = Materials::new();
        let mut grid = warmed_center_grid();
        let config = HeatConfig {
            keep_frame_heat: true,
            ..HeatConfig::default()
        };
        HeatConduction::update(&mut grid.frame(), &materials, &config);
        assert_eq!(grid.next_cell(1, 1).unwrap().temperature, 35.0);
    }
}
