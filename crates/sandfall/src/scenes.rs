//! Starting layouts for headless runs
//!
//! Every scene is laid out relative to the grid size so it works for any
//! world that is at least a few dozen cells across.

use clap::ValueEnum;
use sandfall_core::World;
use sandfall_core::simulation::{MaterialId, SimRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Nothing placed
    Empty,
    /// Sand and water falling into a walled basin
    Sandbox,
    /// Wood, oil and a hydrogen pocket set alight
    Combustion,
    /// Lithium and sodium touching a pool of water
    Reactive,
    /// Ice and steam meeting in the middle
    Thermal,
    /// All of the above side by side
    Showcase,
}

impl Scene {
    /// Place this scene's particles into `world`
    pub fn populate<R: SimRng>(self, world: &mut World<R>) {
        let width = world.width() as i32;
        let height = world.height() as i32;
        let full = Area::new(0, 0, width, height);

        match self {
            Scene::Empty => {}
            Scene::Sandbox => sandbox(world, full),
            Scene::Combustion => combustion(world, full),
            Scene::Reactive => reactive(world, full),
            Scene::Thermal => thermal(world, full),
            Scene::Showcase => {
                let quarter = width / 4;
                sandbox(world, Area::new(0, 0, quarter, height));
                combustion(world, Area::new(quarter, 0, quarter, height));
                reactive(world, Area::new(2 * quarter, 0, quarter, height));
                thermal(world, Area::new(3 * quarter, 0, width - 3 * quarter, height));
            }
        }

        log::info!(
            "Populated {:?} scene with {} particles",
            self,
            world.particle_count()
        );
    }
}

/// Rectangle of the grid a scene is drawn into
#[derive(Debug, Clone, Copy)]
struct Area {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Area {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Absolute column at `num/den` of the width
    fn col(&self, num: i32, den: i32) -> i32 {
        self.x + self.width * num / den
    }

    /// Absolute row at `num/den` of the height
    fn row(&self, num: i32, den: i32) -> i32 {
        self.y + self.height * num / den
    }

    fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }
}

fn fill<R: SimRng>(
    world: &mut World<R>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    material: MaterialId,
) {
    for y in y0..y1 {
        for x in x0..x1 {
            world.place(x, y, material);
        }
    }
}

fn floor<R: SimRng>(world: &mut World<R>, area: Area) {
    let y = area.bottom();
    fill(world, area.x, y, area.x + area.width, y + 1, MaterialId::Wall);
}

fn sandbox<R: SimRng>(world: &mut World<R>, area: Area) {
    floor(world, area);
    let basin_top = area.row(2, 3);
    for y in basin_top..area.bottom() {
        world.place(area.col(1, 8), y, MaterialId::Wall);
        world.place(area.col(7, 8), y, MaterialId::Wall);
    }

    fill(
        world,
        area.col(1, 4),
        area.row(1, 10),
        area.col(2, 4),
        area.row(3, 10),
        MaterialId::Sand,
    );
    fill(
        world,
        area.col(2, 4),
        area.row(1, 10),
        area.col(3, 4),
        area.row(2, 10),
        MaterialId::Water,
    );
}

fn combustion<R: SimRng>(world: &mut World<R>, area: Area) {
    floor(world, area);
    let ground = area.bottom();

    // Wooden block with a flame on top
    let wood_top = area.row(3, 4);
    fill(
        world,
        area.col(1, 8),
        wood_top,
        area.col(3, 8),
        ground,
        MaterialId::Wood,
    );
    fill(
        world,
        area.col(1, 8),
        wood_top - 1,
        area.col(3, 8),
        wood_top,
        MaterialId::Fire,
    );

    // Oil pool in a trough
    let trough_top = area.row(5, 6);
    for y in trough_top..ground {
        world.place(area.col(4, 8), y, MaterialId::Wall);
        world.place(area.col(7, 8), y, MaterialId::Wall);
    }
    fill(
        world,
        area.col(4, 8) + 1,
        trough_top,
        area.col(7, 8),
        ground,
        MaterialId::Oil,
    );
    world.place(area.col(11, 16), trough_top - 1, MaterialId::Fire);

    // Hydrogen pocket drifting toward a flame
    let pocket = area.row(1, 3);
    fill(
        world,
        area.col(3, 8),
        pocket,
        area.col(5, 8),
        pocket + 3,
        MaterialId::Hydrogen,
    );
    world.place(area.col(4, 8), pocket - 2, MaterialId::Fire);
}

fn reactive<R: SimRng>(world: &mut World<R>, area: Area) {
    floor(world, area);
    let pool_top = area.row(3, 4);
    fill(
        world,
        area.x,
        pool_top,
        area.x + area.width,
        area.bottom(),
        MaterialId::Water,
    );

    // Metal chunks resting on the surface
    let drop = pool_top - 2;
    fill(
        world,
        area.col(1, 4),
        drop,
        area.col(1, 4) + 2,
        drop + 2,
        MaterialId::Lithium,
    );
    fill(
        world,
        area.col(3, 4),
        drop,
        area.col(3, 4) + 2,
        drop + 2,
        MaterialId::Sodium,
    );
}

fn thermal<R: SimRng>(world: &mut World<R>, area: Area) {
    floor(world, area);
    fill(
        world,
        area.col(1, 8),
        area.row(2, 3),
        area.col(3, 8),
        area.bottom(),
        MaterialId::Ice,
    );
    fill(
        world,
        area.col(5, 8),
        area.row(2, 3),
        area.col(7, 8),
        area.bottom(),
        MaterialId::Steam,
    );
    fill(
        world,
        area.col(3, 8),
        area.row(1, 3),
        area.col(5, 8),
        area.row(1, 3) + 2,
        MaterialId::OilVapor,
    );
}
