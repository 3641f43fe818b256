//! Lifetimes and fire spreading

use super::grid::FrameView;
use super::stats::SimStats;
use crate::config::FireConfig;
use crate::simulation::{INFINITE_LIFE, MaterialId, PhysicalState, SimRng};

/// Cardinal directions fire may spread in: up, right, down, left
const SPREAD_DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Per-material behaviors that don't fit the generic passes
pub struct SpecialBehaviorsSystem;

impl SpecialBehaviorsSystem {
    /// Count down lifetimes, remove expired cells and let fire spread.
    ///
    /// Works in place on `next`. A cell whose lifetime is 0 after the
    /// countdown becomes empty air before anything else happens to it.
    pub fn update(
        view: &mut FrameView<'_>,
        config: &FireConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        for index in 0..view.next.len() {
            let cell = &mut view.next[index];
            if cell.is_empty() || cell.material == MaterialId::Wall {
                continue;
            }

            if cell.life > 0 {
                cell.life -= 1;
            }
            if cell.life == 0 {
                cell.clear();
                cell.life = INFINITE_LIFE;
                view.mark(index);
                stats.record_cell_expired();
                continue;
            }

            if cell.material == MaterialId::Fire {
                let life = cell.life;
                Self::spread_fire(view, index, life, config, stats, rng);
            }
        }
    }

    fn spread_fire(
        view: &mut FrameView<'_>,
        index: usize,
        life: i32,
        config: &FireConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        if life <= config.min_spread_life || !rng.check_probability(config.spread_probability) {
            return;
        }

        let (dx, dy) = SPREAD_DIRECTIONS[rng.gen_i32_range(0, 4) as usize];
        let pos = view.position(index);
        let Some(target_index) = view.try_index(pos.x + dx, pos.y + dy) else {
            return;
        };

        let target = &mut view.next[target_index];
        if !target.is_empty() || target.temperature <= config.spread_min_temperature {
            return;
        }

        let child_life =
            life - config.spread_life_penalty - rng.gen_i32_range(0, config.spread_life_jitter);
        if child_life > 0 {
            target.material = MaterialId::Fire;
            target.state = PhysicalState::Gas;
            target.life = child_life;
            view.mark(target_index);
            stats.record_fire_spread();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Cell, Materials};
    use crate::world::{FrameStats, Grid};

    /// Scripted RNG: fixed float, accepts every probability check
    struct TestRng {
        f32_value: f32,
    }

    impl SimRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            true
        }

        fn gen_f32(&mut self) -> f32 {
            self.f32_value
        }

        fn check_probability(&mut self, _probability: f32) -> bool {
            true
        }
    }

    fn run(grid: &mut Grid, f32_value: f32) -> FrameStats {
        let mut stats = FrameStats::default();
        grid.begin_frame();
        SpecialBehaviorsSystem::update(
            &mut grid.frame(),
            &FireConfig::default(),
            &mut stats,
            &mut TestRng { f32_value },
        );
        stats
    }

    fn cell_with_life(material: MaterialId, life: i32) -> Cell {
        let materials = Materials::new();
        Cell {
            life,
            ..Cell::new(material, &materials)
        }
    }

    #[test]
    fn test_infinite_life_never_decrements() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 1, cell_with_life(MaterialId::Sand, INFINITE_LIFE));
        run(&mut grid, 0.0);
        assert_eq!(grid.next_cell(1, 1).unwrap().life, INFINITE_LIFE);
        assert_eq!(grid.next_cell(1, 1).unwrap().material, MaterialId::Sand);
    }

    #[test]
    fn test_countdown() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 1, cell_with_life(MaterialId::Co2, 7));
        run(&mut grid, 0.0);
        assert_eq!(grid.next_cell(1, 1).unwrap().life, 6);
    }

    #[test]
    fn test_last_frame_removes_cell() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 1, cell_with_life(MaterialId::Fire, 1));
        let stats = run(&mut grid, 0.0);
        let cell = grid.next_cell(1, 1).unwrap();
        assert!(cell.is_empty());
        assert_eq!(cell.state, PhysicalState::Gas);
        assert_eq!(stats.cells_expired, 1);
    }

    #[test]
    fn test_zero_life_removed_immediately() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 2, cell_with_life(MaterialId::Steam, 0));
        run(&mut grid, 0.0);
        assert!(grid.next_cell(2, 2).unwrap().is_empty());
    }

    #[test]
    fn test_fire_spreads_into_hot_air() {
        let materials = Materials::new();
        let mut grid = Grid::new(5, 5);
        let mut fire = Cell::new(MaterialId::Fire, &materials);
        fire.life = 40;
        grid.set(2, 2, fire);
        // gen_i32_range(0, 4) with 0.0 picks "up"
        grid.set(
            2,
            1,
            Cell {
                temperature: 120.0,
                ..Cell::EMPTY
            },
        );

        let stats = run(&mut grid, 0.0);
        let child = grid.next_cell(2, 1).unwrap();
        assert_eq!(child.material, MaterialId::Fire);
        // Parent decremented to 39, minus penalty 5, minus jitter 0
        assert_eq!(child.life, 34);
        assert_eq!(stats.fire_spreads, 1);
    }

    #[test]
    fn test_fire_does_not_spread_into_cool_air() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, cell_with_life(MaterialId::Fire, 40));
        let stats = run(&mut grid, 0.0);
        assert!(grid.next_cell(2, 1).unwrap().is_empty());
        assert_eq!(stats.fire_spreads, 0);
    }

    #[test]
    fn test_dying_fire_does_not_spread() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, cell_with_life(MaterialId::Fire, 11));
        grid.set(
            2,
            1,
            Cell {
                temperature: 500.0,
                ..Cell::EMPTY
            },
        );
        run(&mut grid, 0.0);
        // 11 counts down to 10, which is not above the spread threshold
        assert!(grid.next_cell(2, 1).unwrap().is_empty());
    }
}
