//! Chemistry pass: neighbor reactions and the explosions they set off

use glam::{IVec2, Vec2};

use super::grid::FrameView;
use super::stats::SimStats;
use crate::config::{ExplosionConfig, SimulationConfig};
use crate::simulation::{
    CellFlags, MaterialId, Materials, Participant, PhysicalState, ReactionContext, ReactionEffect,
    ReactionRegistry, SimRng,
};

/// Neighbor scan order: N, NE, E, SE, S, SW, W, NW (+y is down)
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Handles chemistry simulation: reactions between touching cells
pub struct ChemistrySystem;

impl ChemistrySystem {
    /// Run the chemistry pass over the whole grid.
    ///
    /// Reads `current`, writes `next`. Each occupied cell acts as center at
    /// most once and stops scanning after its first reaction; a cell that
    /// already took part in a reaction this frame is not used as a center.
    pub fn update(
        view: &mut FrameView<'_>,
        reactions: &ReactionRegistry,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        if reactions.is_empty() {
            return;
        }

        let current = view.current;
        for y in 0..view.height() {
            for x in 0..view.width() {
                let index = view.index(x, y);
                let center = &current[index];
                if center.is_empty() || view.next[index].has_reacted() {
                    continue;
                }

                let center_pos = IVec2::new(x as i32, y as i32);
                for (dx, dy) in NEIGHBOR_OFFSETS {
                    let neighbor_pos = center_pos + IVec2::new(dx, dy);
                    let Some(neighbor_index) = view.try_index(neighbor_pos.x, neighbor_pos.y)
                    else {
                        continue;
                    };
                    let neighbor = &current[neighbor_index];
                    if neighbor.is_empty() {
                        continue;
                    }

                    let ctx = ReactionContext {
                        center,
                        neighbor,
                        center_pos,
                        neighbor_pos,
                    };
                    if let Some(effect) = reactions.resolve(ctx, rng) {
                        Self::apply_effect(
                            view,
                            (index, center_pos),
                            (neighbor_index, neighbor_pos),
                            &effect,
                            materials,
                            config,
                            stats,
                            rng,
                        );
                        // Only one reaction per center per frame
                        break;
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_effect(
        view: &mut FrameView<'_>,
        (center_index, center_pos): (usize, IVec2),
        (neighbor_index, neighbor_pos): (usize, IVec2),
        effect: &ReactionEffect,
        materials: &Materials,
        config: &SimulationConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        let heat = effect.heat_released * config.heat.reaction_heat_scale;

        let participants = [
            (center_index, effect.center, effect.center_life),
            (neighbor_index, effect.neighbor, effect.neighbor_life),
        ];
        for (index, material, life) in participants {
            let cell = &mut view.next[index];
            if let Some(material) = material {
                cell.set_material(material, materials);
            }
            life.apply(&mut cell.life);
            cell.temperature += heat;
            cell.flags.insert(CellFlags::REACTED);
            view.mark(index);
        }
        stats.record_reaction();

        if let Some(explosion) = effect.explosion {
            if explosion.radius > 0 {
                let origin = match explosion.origin {
                    Participant::Center => center_pos,
                    Participant::Neighbor => neighbor_pos,
                };
                Self::apply_explosion(
                    view,
                    origin,
                    explosion.radius,
                    explosion.force,
                    &config.explosion,
                    stats,
                    rng,
                );
            }
        }
    }

    /// Push, heat and possibly shatter everything within `radius` of `origin`.
    ///
    /// The origin cell itself is left alone. Walls take the impulse and heat
    /// but are never destroyed.
    pub fn apply_explosion(
        view: &mut FrameView<'_>,
        origin: IVec2,
        radius: i32,
        force: f32,
        config: &ExplosionConfig,
        stats: &mut dyn SimStats,
        rng: &mut dyn SimRng,
    ) {
        let radius_f = radius as f32;
        log::trace!(
            "Explosion at ({}, {}) radius {} force {}",
            origin.x,
            origin.y,
            radius,
            force
        );

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if distance > radius_f || distance < 0.1 {
                    continue;
                }
                let Some(index) = view.try_index(origin.x + dx, origin.y + dy) else {
                    continue;
                };

                let strength = force * (1.0 - distance / radius_f);
                let cell = &mut view.next[index];
                cell.velocity += Vec2::new(dx as f32, dy as f32) / distance * strength;
                cell.temperature += strength * config.heat_per_strength;

                if cell.material != MaterialId::Wall
                    && strength > config.destroy_threshold
                    && matches!(cell.state, PhysicalState::Solid | PhysicalState::Powder)
                    && rng.check_probability(strength * config.destroy_chance_per_strength)
                {
                    cell.clear();
                    stats.record_cell_destroyed();
                }
                view.mark(index);
            }
        }

        stats.record_explosion();
    }
}
