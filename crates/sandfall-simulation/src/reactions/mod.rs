//! Chemical reaction system
//!
//! Reactions fire when two specific materials sit next to each other. Each
//! rule names an ordered reactant pair, a probability and a handler that
//! decides what the pair turns into. Matching is order-sensitive, so a
//! reaction that should work both ways is registered twice with
//! `ReactionRegistry::register_pair`.
//!
//! Built-in rule sets:
//! - [`combustion`]: wood, oil, hydrogen and ice meeting fire
//! - [`water_metal`]: water meeting lithium or sodium
//! - [`evaporation`]: oil vapor meeting fire

pub mod combustion;
pub mod evaporation;
pub mod water_metal;

use std::fmt;
use std::sync::Arc;

use glam::IVec2;

use crate::{Cell, MaterialId, SimRng};

/// Lifetime change requested by a reaction for one participant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifeOverride {
    /// Keep whatever lifetime the cell already has
    #[default]
    Unchanged,
    /// Never expire
    Infinite,
    /// Expire after this many frames
    Frames(u32),
}

impl LifeOverride {
    pub fn apply(self, life: &mut i32) {
        match self {
            LifeOverride::Unchanged => {}
            LifeOverride::Infinite => *life = crate::INFINITE_LIFE,
            LifeOverride::Frames(frames) => *life = frames.min(i32::MAX as u32) as i32,
        }
    }
}

/// One side of a reacting pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Participant {
    Center,
    Neighbor,
}

impl Participant {
    fn flipped(self) -> Self {
        match self {
            Participant::Center => Participant::Neighbor,
            Participant::Neighbor => Participant::Center,
        }
    }
}

/// Radial blast requested by a reaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    /// Cells; a radius of 0 is no explosion
    pub radius: i32,
    pub force: f32,
    /// Which participant the blast is centered on
    pub origin: Participant,
}

/// What a successful reaction does to the two participants
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReactionEffect {
    /// New material for the center cell (None = unchanged)
    pub center: Option<MaterialId>,
    /// New material for the neighbor cell (None = unchanged)
    pub neighbor: Option<MaterialId>,
    /// Joules, positive = exothermic
    pub heat_released: f32,
    pub explosion: Option<Explosion>,
    pub center_life: LifeOverride,
    pub neighbor_life: LifeOverride,
}

impl ReactionEffect {
    /// Exchange the roles of center and neighbor
    pub fn swapped(self) -> Self {
        Self {
            center: self.neighbor,
            neighbor: self.center,
            heat_released: self.heat_released,
            explosion: self.explosion.map(|explosion| Explosion {
                origin: explosion.origin.flipped(),
                ..explosion
            }),
            center_life: self.neighbor_life,
            neighbor_life: self.center_life,
        }
    }
}

/// The pair of cells a handler is asked about
#[derive(Clone, Copy, Debug)]
pub struct ReactionContext<'a> {
    pub center: &'a Cell,
    pub neighbor: &'a Cell,
    pub center_pos: IVec2,
    pub neighbor_pos: IVec2,
}

impl<'a> ReactionContext<'a> {
    pub fn swapped(self) -> Self {
        Self {
            center: self.neighbor,
            neighbor: self.center,
            center_pos: self.neighbor_pos,
            neighbor_pos: self.center_pos,
        }
    }
}

/// Decides the outcome of a matched reactant pair.
///
/// Returning `None` means nothing happened and the resolver moves on to the
/// next rule.
pub trait ReactionHandler: Send + Sync {
    fn react(&self, ctx: ReactionContext<'_>, rng: &mut dyn SimRng) -> Option<ReactionEffect>;
}

impl<F> ReactionHandler for F
where
    F: Fn(ReactionContext<'_>, &mut dyn SimRng) -> Option<ReactionEffect> + Send + Sync,
{
    fn react(&self, ctx: ReactionContext<'_>, rng: &mut dyn SimRng) -> Option<ReactionEffect> {
        self(ctx, rng)
    }
}

/// Whether a rule hands its handler the pair as matched or swapped back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    /// Twin of a forward rule; the handler sees the forward ordering and its
    /// result is mapped back onto the matched center/neighbor
    Reversed,
}

/// A registered reaction between two materials
#[derive(Clone)]
pub struct ReactionRule {
    /// Human-readable name
    pub name: String,
    pub reactant_a: MaterialId,
    pub reactant_b: MaterialId,
    /// Chance per matching contact (0.0 - 1.0)
    pub probability: f32,
    /// Stored with the rule but never consulted when matching
    pub min_temperature: f32,
    pub orientation: Orientation,
    handler: Arc<dyn ReactionHandler>,
}

impl ReactionRule {
    #[inline]
    pub fn matches(&self, center: MaterialId, neighbor: MaterialId) -> bool {
        self.reactant_a == center && self.reactant_b == neighbor
    }

    fn invoke(&self, ctx: ReactionContext<'_>, rng: &mut dyn SimRng) -> Option<ReactionEffect> {
        match self.orientation {
            Orientation::Forward => self.handler.react(ctx, rng),
            Orientation::Reversed => self
                .handler
                .react(ctx.swapped(), rng)
                .map(ReactionEffect::swapped),
        }
    }
}

impl fmt::Debug for ReactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionRule")
            .field("name", &self.name)
            .field("reactant_a", &self.reactant_a)
            .field("reactant_b", &self.reactant_b)
            .field("probability", &self.probability)
            .field("min_temperature", &self.min_temperature)
            .field("orientation", &self.orientation)
            .finish_non_exhaustive()
    }
}

/// Ordered list of reaction rules, first match wins
#[derive(Clone, Debug, Default)]
pub struct ReactionRegistry {
    rules: Vec<ReactionRule>,
}

impl ReactionRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry holding every built-in rule set
    pub fn with_default_reactions() -> Self {
        let mut registry = Self::new();
        registry.register_default_reactions();
        registry
    }

    /// Append the built-in rule sets in their canonical order
    pub fn register_default_reactions(&mut self) {
        combustion::register(self);
        water_metal::register(self);
        evaporation::register(self);
        log::info!("Registered {} reaction rules", self.rules.len());
    }

    /// Append a single order-sensitive rule
    pub fn register<H>(
        &mut self,
        name: &str,
        reactant_a: MaterialId,
        reactant_b: MaterialId,
        probability: f32,
        min_temperature: f32,
        handler: H,
    ) where
        H: ReactionHandler + 'static,
    {
        self.rules.push(ReactionRule {
            name: name.to_string(),
            reactant_a,
            reactant_b,
            probability,
            min_temperature,
            orientation: Orientation::Forward,
            handler: Arc::new(handler),
        });
    }

    /// Append a rule and its mirrored twin so the reaction works in both orders
    pub fn register_pair<H>(
        &mut self,
        name: &str,
        reactant_a: MaterialId,
        reactant_b: MaterialId,
        probability: f32,
        min_temperature: f32,
        handler: H,
    ) where
        H: ReactionHandler + 'static,
    {
        let handler: Arc<dyn ReactionHandler> = Arc::new(handler);
        self.rules.push(ReactionRule {
            name: name.to_string(),
            reactant_a,
            reactant_b,
            probability,
            min_temperature,
            orientation: Orientation::Forward,
            handler: Arc::clone(&handler),
        });
        if reactant_a != reactant_b {
            self.rules.push(ReactionRule {
                name: format!("{name} (rev)"),
                reactant_a: reactant_b,
                reactant_b: reactant_a,
                probability,
                min_temperature,
                orientation: Orientation::Reversed,
                handler,
            });
        }
    }

    /// Find the first rule for this ordered pair that passes its probability
    /// roll and whose handler reports an effect.
    pub fn resolve(
        &self,
        ctx: ReactionContext<'_>,
        rng: &mut dyn SimRng,
    ) -> Option<ReactionEffect> {
        let center = ctx.center.material;
        let neighbor = ctx.neighbor.material;

        for rule in self.rules.iter().filter(|rule| rule.matches(center, neighbor)) {
            if rng.gen_f32() > rule.probability {
                continue;
            }
            if let Some(effect) = rule.invoke(ctx, rng) {
                log::trace!(
                    "Reaction '{}' at ({}, {}) with ({}, {})",
                    rule.name,
                    ctx.center_pos.x,
                    ctx.center_pos.y,
                    ctx.neighbor_pos.x,
                    ctx.neighbor_pos.y
                );
                return Some(effect);
            }
        }

        None
    }

    pub fn rules(&self) -> impl Iterator<Item = &ReactionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

/// Lifetime given to a reaction product
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductLife {
    Infinite,
    /// Uniform in `[min, max)` frames
    Between(u32, u32),
}

/// A material a participant turns into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Product {
    pub material: MaterialId,
    pub life: ProductLife,
}

impl Product {
    pub const fn lasting(material: MaterialId) -> Self {
        Self {
            material,
            life: ProductLife::Infinite,
        }
    }

    pub const fn burning(material: MaterialId, min: u32, max: u32) -> Self {
        Self {
            material,
            life: ProductLife::Between(min, max),
        }
    }

    fn roll_life(&self, rng: &mut dyn SimRng) -> LifeOverride {
        match self.life {
            ProductLife::Infinite => LifeOverride::Infinite,
            ProductLife::Between(min, max) => {
                LifeOverride::Frames(rng.gen_i32_range(min as i32, max as i32).max(0) as u32)
            }
        }
    }
}

/// Data-driven handler: both participants become fixed products.
///
/// The handler rolls its own probability on top of the registry's roll, so
/// the effective chance of an uncontrolled rule is `probability²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transmutation {
    pub probability: f32,
    pub center: Product,
    pub neighbor: Product,
    pub heat_released: f32,
    /// (radius, force), centered on the center participant
    pub explosion: Option<(i32, f32)>,
}

impl ReactionHandler for Transmutation {
    fn react(&self, _ctx: ReactionContext<'_>, rng: &mut dyn SimRng) -> Option<ReactionEffect> {
        if !rng.check_probability(self.probability) {
            return None;
        }

        Some(ReactionEffect {
            center: Some(self.center.material),
            neighbor: Some(self.neighbor.material),
            heat_released: self.heat_released,
            explosion: self.explosion.map(|(radius, force)| Explosion {
                radius,
                force,
                origin: Participant::Center,
            }),
            center_life: self.center.roll_life(rng),
            neighbor_life: self.neighbor.roll_life(rng),
        })
    }
}

/// Rules in the built-in sets accept any temperature
pub(crate) const NO_MIN_TEMPERATURE: f32 = -999.0;
