//! Combustion: fuels meeting fire
//!
//! The fuel cell catches fire and the flame it touched burns out into a
//! gaseous product. Hydrogen detonates; ice is melted instead of burned and
//! absorbs heat.

use super::{NO_MIN_TEMPERATURE, Product, ReactionRegistry, Transmutation};
use crate::MaterialId;

/// Wood + Fire → Fire + CO2
pub const WOOD_FIRE: Transmutation = Transmutation {
    probability: 0.5,
    center: Product::burning(MaterialId::Fire, 30, 60),
    neighbor: Product::lasting(MaterialId::Co2),
    heat_released: 15_000.0,
    explosion: None,
};

/// Oil + Fire → Fire + CO2, burns longer and hotter than wood
pub const OIL_FIRE: Transmutation = Transmutation {
    probability: 0.7,
    center: Product::burning(MaterialId::Fire, 40, 80),
    neighbor: Product::lasting(MaterialId::Co2),
    heat_released: 30_000.0,
    explosion: None,
};

/// Hydrogen + Fire → Fire + Steam, with a blast
pub const HYDROGEN_FIRE: Transmutation = Transmutation {
    probability: 0.8,
    center: Product::burning(MaterialId::Fire, 20, 40),
    neighbor: Product::lasting(MaterialId::Steam),
    heat_released: 50_000.0,
    explosion: Some((5, 3.0)),
};

/// Ice + Fire → Water + Steam (endothermic)
pub const ICE_FIRE: Transmutation = Transmutation {
    probability: 1.0,
    center: Product::lasting(MaterialId::Water),
    neighbor: Product::lasting(MaterialId::Steam),
    heat_released: -33_400.0,
    explosion: None,
};

pub fn register(registry: &mut ReactionRegistry) {
    let rules = [
        ("wood_fire", MaterialId::Wood, WOOD_FIRE),
        ("oil_fire", MaterialId::Oil, OIL_FIRE),
        ("hydrogen_fire", MaterialId::Hydrogen, HYDROGEN_FIRE),
        ("ice_fire", MaterialId::Ice, ICE_FIRE),
    ];

    for (name, fuel, handler) in rules {
        registry.register_pair(
            name,
            fuel,
            MaterialId::Fire,
            handler.probability,
            NO_MIN_TEMPERATURE,
            handler,
        );
    }
}
