//! World - owns the grid, the tables and the random source, and steps frames

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::ca_update::CellularAutomataUpdater;
use super::chemistry_system::ChemistrySystem;
use super::grid::Grid;
use super::special_behaviors_system::SpecialBehaviorsSystem;
use super::stats::FrameStats;
use crate::config::{ConfigError, SimulationConfig};
use crate::simulation::{
    AMBIENT_TEMPERATURE, Cell, ForceIntegrator, HeatConduction, MaterialId, Materials,
    PhysicalState, ReactionRegistry, SimRng, StateChangeSystem,
};

/// The simulated world
///
/// Generic over its random source so tests can drive it with a scripted RNG.
pub struct World<R: SimRng = Xoshiro256StarStar> {
    grid: Grid,

    /// Material definitions
    materials: Materials,

    /// Chemical reaction registry
    reactions: ReactionRegistry,

    config: SimulationConfig,

    rng: R,

    /// Frames stepped since creation
    frame: u64,

    last_stats: FrameStats,
    total_stats: FrameStats,
}

impl World {
    /// World with the built-in material table and reactions, seeded from
    /// `config.seed`
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_tables(
            config,
            Materials::new(),
            ReactionRegistry::with_default_reactions(),
        )
    }

    /// World with caller-supplied tables, seeded from `config.seed`
    pub fn with_tables(
        config: SimulationConfig,
        materials: Materials,
        reactions: ReactionRegistry,
    ) -> Result<Self, ConfigError> {
        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        World::with_rng(config, materials, reactions, rng)
    }
}

impl<R: SimRng> World<R> {
    pub fn with_rng(
        config: SimulationConfig,
        materials: Materials,
        reactions: ReactionRegistry,
        rng: R,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected simulation config: {}", e);
            return Err(e);
        }
        materials.validate()?;

        log::info!(
            "Created {}x{} world ({} materials, {} reaction rules)",
            config.width,
            config.height,
            materials.len(),
            reactions.len()
        );

        Ok(Self {
            grid: Grid::new(config.width, config.height),
            materials,
            reactions,
            config,
            rng,
            frame: 0,
            last_stats: FrameStats::default(),
            total_stats: FrameStats::default(),
        })
    }

    /// Replace the registry contents with the built-in rule sets
    pub fn initialize_reactions(&mut self) {
        self.reactions.clear();
        self.reactions.register_default_reactions();
    }

    /// Seed a fresh particle of `material` at (x, y).
    ///
    /// Returns false (and does nothing) outside the grid.
    pub fn place(&mut self, x: i32, y: i32, material: MaterialId) -> bool {
        if !self.grid.in_bounds(x, y) {
            return false;
        }

        let placement = &self.config.placement;
        let mut cell = Cell::new(material, &self.materials);
        match material {
            MaterialId::Fire => {
                cell.temperature = placement.fire_temperature;
                cell.life = self
                    .rng
                    .gen_i32_range(placement.fire_life_min, placement.fire_life_max);
            }
            MaterialId::Ice => cell.temperature = placement.ice_temperature,
            MaterialId::Steam => cell.temperature = placement.steam_temperature,
            _ => cell.temperature = AMBIENT_TEMPERATURE,
        }

        self.grid.set(x, y, cell)
    }

    /// Place by raw id; unknown ids place empty air
    pub fn place_raw(&mut self, x: i32, y: i32, raw: u8) -> bool {
        self.place(x, y, MaterialId::from_raw(raw))
    }

    /// Reset every cell to empty ambient air
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self) -> &FrameStats {
        let mut stats = FrameStats::default();

        self.grid.begin_frame();
        let heat_changes = {
            let mut view = self.grid.frame();

            // 1. Reactions between touching cells
            ChemistrySystem::update(
                &mut view,
                &self.reactions,
                &self.materials,
                &self.config,
                &mut stats,
                &mut self.rng,
            );

            // 2. Heat conduction
            let heat_changes =
                HeatConduction::update(&mut view, &self.materials, &self.config.heat);

            // 3. Phase changes
            StateChangeSystem::update(&mut view, &self.materials, &mut stats);

            // 4. Gravity and liquid spreading
            ForceIntegrator::update(
                &mut view,
                &self.materials,
                &self.config.physics,
                &mut self.rng,
            );

            // 5. Lifetimes and fire spread
            SpecialBehaviorsSystem::update(
                &mut view,
                &self.config.fire,
                &mut stats,
                &mut self.rng,
            );

            // 6. Movement
            CellularAutomataUpdater::update(
                &mut view,
                &self.materials,
                &self.config,
                &mut stats,
                &mut self.rng,
            );

            heat_changes
        };
        self.grid.commit();

        self.frame += 1;
        log::debug!(
            "Frame {}: {} moves, {} reactions, {} explosions, {} state changes, {} heat changes, {} expired, {} chunks touched",
            self.frame,
            stats.cells_moved,
            stats.reactions,
            stats.explosions,
            stats.state_changes,
            heat_changes,
            stats.cells_expired,
            self.grid.regions().touched_count()
        );

        self.total_stats.accumulate(&stats);
        self.last_stats = stats;
        &self.last_stats
    }

    /// Material id per cell, row-major, as of the last committed frame
    pub fn render_buffer(&self) -> &[u8] {
        self.grid.render_buffer()
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.grid.cell(x, y)
    }

    pub fn material(&self, x: i32, y: i32) -> Option<MaterialId> {
        self.cell(x, y).map(|c| c.material)
    }

    pub fn temperature(&self, x: i32, y: i32) -> Option<f32> {
        self.cell(x, y).map(|c| c.temperature)
    }

    pub fn state(&self, x: i32, y: i32) -> Option<PhysicalState> {
        self.cell(x, y).map(|c| c.state)
    }

    /// Number of non-empty cells
    pub fn particle_count(&self) -> usize {
        self.grid.cells().iter().filter(|c| !c.is_empty()).count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_frame_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    pub fn total_stats(&self) -> &FrameStats {
        &self.total_stats
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn reactions(&self) -> &ReactionRegistry {
        &self.reactions
    }

    pub fn reactions_mut(&mut self) -> &mut ReactionRegistry {
        &mut self.reactions
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::INFINITE_LIFE;

    fn small_world() -> World {
        World::new(SimulationConfig::with_size(16, 12)).unwrap()
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = small_world();
        assert_eq!(world.width(), 16);
        assert_eq!(world.height(), 12);
        assert_eq!(world.particle_count(), 0);
        assert_eq!(world.frame(), 0);
        assert_eq!(world.reactions().len(), 14);
        assert!(world.render_buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(matches!(
            World::new(SimulationConfig::with_size(0, 10)),
            Err(ConfigError::ZeroDimensions { .. })
        ));
    }

    #[test]
    fn test_place_initial_conditions() {
        let mut world = small_world();

        assert!(world.place(1, 1, MaterialId::Fire));
        let fire = *world.cell(1, 1).unwrap();
        assert_eq!(fire.temperature, 150.0);
        assert!((30..60).contains(&fire.life));
        assert_eq!(fire.state, PhysicalState::Gas);

        world.place(2, 1, MaterialId::Ice);
        assert_eq!(world.temperature(2, 1), Some(-10.0));
        assert_eq!(world.cell(2, 1).unwrap().life, INFINITE_LIFE);
        assert_eq!(world.state(2, 1), Some(PhysicalState::Solid));

        world.place(3, 1, MaterialId::Steam);
        assert_eq!(world.temperature(3, 1), Some(110.0));

        world.place(4, 1, MaterialId::Sand);
        assert_eq!(world.temperature(4, 1), Some(20.0));
        assert_eq!(world.state(4, 1), Some(PhysicalState::Powder));
        assert_eq!(world.render_buffer()[16 + 4], MaterialId::Sand.as_raw());
    }

    #[test]
    fn test_place_out_of_bounds_is_noop() {
        let mut world = small_world();
        assert!(!world.place(-1, 0, MaterialId::Sand));
        assert!(!world.place(16, 0, MaterialId::Sand));
        assert!(!world.place(0, 12, MaterialId::Sand));
        assert_eq!(world.particle_count(), 0);
        assert_eq!(world.cell(-1, 0), None);
    }

    #[test]
    fn test_place_raw_unknown_is_empty() {
        let mut world = small_world();
        world.place(3, 3, MaterialId::Sand);
        assert!(world.place_raw(3, 3, 200));
        assert_eq!(world.material(3, 3), Some(MaterialId::Empty));
        assert!(world.place_raw(4, 3, MaterialId::Water.as_raw()));
        assert_eq!(world.material(4, 3), Some(MaterialId::Water));
    }

    #[test]
    fn test_step_advances_frame_and_render() {
        let mut world = small_world();
        world.place(5, 0, MaterialId::Sand);
        let stats = *world.step();
        assert_eq!(world.frame(), 1);
        assert_eq!(stats.cells_moved, 1);
        assert_eq!(world.material(5, 1), Some(MaterialId::Sand));
        assert_eq!(world.render_buffer()[16 + 5], MaterialId::Sand.as_raw());
        assert_eq!(world.render_buffer()[5], 0);
    }

    #[test]
    fn test_initialize_reactions_restores_defaults() {
        let mut world = small_world();
        world.reactions_mut().clear();
        assert!(world.reactions().is_empty());
        world.initialize_reactions();
        assert_eq!(world.reactions().len(), 14);
        world.initialize_reactions();
        assert_eq!(world.reactions().len(), 14);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut world = small_world();
        world.place(2, 2, MaterialId::Wall);
        world.place(3, 2, MaterialId::Fire);
        world.clear();
        assert_eq!(world.particle_count(), 0);
        assert!(world.render_buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_total_stats_accumulate() {
        let mut world = small_world();
        world.place(5, 0, MaterialId::Sand);
        world.step();
        world.step();
        assert_eq!(world.total_stats().cells_moved, 2);
        assert_eq!(world.last_frame_stats().cells_moved, 1);
    }
}
