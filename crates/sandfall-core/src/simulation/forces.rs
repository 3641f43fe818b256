//! Force integration: density-relative gravity and liquid spreading

use crate::config::PhysicsConfig;
use crate::simulation::{MaterialId, Materials, PhysicalState, SimRng};
use crate::world::FrameView;

/// Horizontal speeds below this count as standing still
const STILL_EPSILON: f32 = 0.01;

pub struct ForceIntegrator;

impl ForceIntegrator {
    /// Gravity contribution for a material: heavier than air falls (+y),
    /// lighter rises
    #[inline]
    pub fn buoyant_gravity(density: f32, config: &PhysicsConfig) -> f32 {
        config.gravity * (density - config.air_density) / config.density_scale
    }

    /// Integrate forces into the velocities of the frame being built.
    ///
    /// Solid-state cells and walls carry no velocity updates. Liquids that
    /// cannot fall get a sideways push; occupancy checks for that use the
    /// committed grid.
    pub fn update(
        view: &mut FrameView<'_>,
        materials: &Materials,
        config: &PhysicsConfig,
        rng: &mut dyn SimRng,
    ) {
        let width = view.width();
        let height = view.height();
        let current = view.current;

        for y in 0..height {
            for x in 0..width {
                let index = view.index(x, y);
                let cell = &mut view.next[index];
                if cell.is_empty()
                    || cell.material == MaterialId::Wall
                    || cell.state == PhysicalState::Solid
                {
                    continue;
                }

                let density = materials.density(cell.material);
                cell.velocity.y += Self::buoyant_gravity(density, config);
                Self::clamp_velocity(&mut cell.velocity, config);

                if cell.state != PhysicalState::Liquid {
                    continue;
                }

                let blocked_below = y + 1 >= height || {
                    let below = &current[index + width];
                    !below.is_empty() && materials.density(below.material) >= density
                };
                if !blocked_below {
                    continue;
                }

                let left_open = x > 0 && current[index - 1].is_empty();
                let right_open = x + 1 < width && current[index + 1].is_empty();
                match (left_open, right_open) {
                    (true, false) => cell.velocity.x -= config.liquid_spread_impulse,
                    (false, true) => cell.velocity.x += config.liquid_spread_impulse,
                    _ => {
                        if cell.velocity.x.abs() < STILL_EPSILON {
                            cell.velocity.x = if rng.gen_bool() {
                                config.liquid_spread_impulse
                            } else {
                                -config.liquid_spread_impulse
                            };
                        }
                    }
                }
                Self::clamp_velocity(&mut cell.velocity, config);
            }
        }
    }

    #[inline]
    fn clamp_velocity(velocity: &mut glam::Vec2, config: &PhysicsConfig) {
        velocity.x = velocity.x.clamp(-config.max_velocity_x, config.max_velocity_x);
        velocity.y = velocity.y.clamp(-config.max_velocity_y, config.max_velocity_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Cell;
    use crate::world::Grid;
    use glam::Vec2;

    struct TestRng {
        bool_value: bool,
    }

    impl SimRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            self.bool_value
        }

        fn gen_f32(&mut self) -> f32 {
            0.5
        }
    }

    fn step_forces(grid: &mut Grid, rng_bool: bool) {
        let materials = Materials::new();
        grid.begin_frame();
        ForceIntegrator::update(
            &mut grid.frame(),
            &materials,
            &PhysicsConfig::default(),
            &mut TestRng {
                bool_value: rng_bool,
            },
        );
    }

    fn place(grid: &mut Grid, x: i32, y: i32, material: MaterialId) {
        let materials = Materials::new();
        grid.set(x, y, Cell::new(material, &materials));
    }

    #[test]
    fn test_heavy_cells_accelerate_down() {
        let mut grid = Grid::new(5, 5);
        place(&mut grid, 2, 1, MaterialId::Sand);
        step_forces(&mut grid, true);
        let vy = grid.next_cell(2, 1).unwrap().velocity.y;
        assert!((vy - 0.3 * (1600.0 - 1.2) / 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_light_gases_accelerate_up() {
        let mut grid = Grid::new(5, 5);
        place(&mut grid, 2, 2, MaterialId::Hydrogen);
        step_forces(&mut grid, true);
        assert!(grid.next_cell(2, 2).unwrap().velocity.y < 0.0);
    }

    #[test]
    fn test_solids_and_empty_untouched() {
        let mut grid = Grid::new(5, 5);
        place(&mut grid, 1, 1, MaterialId::Wood);
        place(&mut grid, 3, 1, MaterialId::Wall);
        step_forces(&mut grid, true);
        assert_eq!(grid.next_cell(1, 1).unwrap().velocity, Vec2::ZERO);
        assert_eq!(grid.next_cell(3, 1).unwrap().velocity, Vec2::ZERO);
        assert_eq!(grid.next_cell(0, 0).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_velocity_clamped() {
        let materials = Materials::new();
        let mut grid = Grid::new(3, 3);
        let mut sand = Cell::new(MaterialId::Sand, &materials);
        sand.velocity = Vec2::new(-10.0, 4.9);
        grid.set(1, 0, sand);
        step_forces(&mut grid, true);
        let v = grid.next_cell(1, 0).unwrap().velocity;
        assert_eq!(v, Vec2::new(-3.0, 5.0));
    }

    #[test]
    fn test_blocked_liquid_pushed_toward_open_side() {
        let mut grid = Grid::new(5, 3);
        place(&mut grid, 2, 1, MaterialId::Water);
        place(&mut grid, 2, 2, MaterialId::Sand);
        place(&mut grid, 1, 1, MaterialId::Wall);
        step_forces(&mut grid, false);
        assert_eq!(grid.next_cell(2, 1).unwrap().velocity.x, 0.5);
    }

    #[test]
    fn test_blocked_liquid_with_both_sides_open_picks_random() {
        let mut grid = Grid::new(5, 3);
        // Bottom row is the floor
        place(&mut grid, 2, 2, MaterialId::Water);
        step_forces(&mut grid, false);
        assert_eq!(grid.next_cell(2, 2).unwrap().velocity.x, -0.5);
    }

    #[test]
    fn test_blocked_liquid_keeps_existing_drift() {
        let materials = Materials::new();
        let mut grid = Grid::new(5, 3);
        let mut water = Cell::new(MaterialId::Water, &materials);
        water.velocity.x = 1.2;
        grid.set(2, 2, water);
        step_forces(&mut grid, false);
        assert_eq!(grid.next_cell(2, 2).unwrap().velocity.x, 1.2);
    }

    #[test]
    fn test_liquid_over_lighter_cell_not_blocked() {
        let mut grid = Grid::new(5, 3);
        place(&mut grid, 2, 0, MaterialId::Water);
        place(&mut grid, 2, 1, MaterialId::Oil);
        step_forces(&mut grid, true);
        assert_eq!(grid.next_cell(2, 0).unwrap().velocity.x, 0.0);
    }
}
