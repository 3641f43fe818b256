//! Alkali metals meeting water
//!
//! The water is split into hydrogen and the metal ignites, throwing a small
//! blast around the water cell.

use super::{NO_MIN_TEMPERATURE, Product, ReactionRegistry, Transmutation};
use crate::MaterialId;

pub const WATER_LITHIUM: Transmutation = Transmutation {
    probability: 0.8,
    center: Product::lasting(MaterialId::Hydrogen),
    neighbor: Product::burning(MaterialId::Fire, 25, 50),
    heat_released: 40_000.0,
    explosion: Some((4, 2.5)),
};

pub const WATER_SODIUM: Transmutation = Transmutation {
    probability: 0.75,
    center: Product::lasting(MaterialId::Hydrogen),
    neighbor: Product::burning(MaterialId::Fire, 20, 40),
    heat_released: 35_000.0,
    explosion: Some((3, 2.0)),
};

pub fn register(registry: &mut ReactionRegistry) {
    registry.register_pair(
        "water_lithium",
        MaterialId::Water,
        MaterialId::Lithium,
        WATER_LITHIUM.probability,
        NO_MIN_TEMPERATURE,
        WATER_LITHIUM,
    );
    registry.register_pair(
        "water_sodium",
        MaterialId::Water,
        MaterialId::Sodium,
        WATER_SODIUM.probability,
        NO_MIN_TEMPERATURE,
        WATER_SODIUM,
    );
}
