//! Oil vapor meeting fire

use super::{NO_MIN_TEMPERATURE, Product, ReactionRegistry, Transmutation};
use crate::MaterialId;

/// Oil Vapor + Fire → Fire + CO2
pub const OIL_VAPOR_FIRE: Transmutation = Transmutation {
    probability: 0.8,
    center: Product::burning(MaterialId::Fire, 35, 70),
    neighbor: Product::lasting(MaterialId::Co2),
    heat_released: 35_000.0,
    explosion: None,
};

pub fn register(registry: &mut ReactionRegistry) {
    registry.register_pair(
        "oil_vapor_fire",
        MaterialId::OilVapor,
        MaterialId::Fire,
        OIL_VAPOR_FIRE.probability,
        NO_MIN_TEMPERATURE,
        OIL_VAPOR_FIRE,
    );
}
