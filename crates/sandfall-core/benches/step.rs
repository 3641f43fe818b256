use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use sandfall_core::simulation::MaterialId;
use sandfall_core::{SimulationConfig, World};

fn busy_world() -> World {
    let mut world = World::new(SimulationConfig::default()).expect("default config is valid");
    let (width, height) = (world.width() as i32, world.height() as i32);

    for x in 0..width {
        world.place(x, height - 1, MaterialId::Wall);
    }
    for y in 20..60 {
        for x in 40..120 {
            world.place(x, y, MaterialId::Sand);
        }
        for x in 160..240 {
            world.place(x, y, MaterialId::Water);
        }
    }
    for y in height - 40..height - 1 {
        for x in 280..340 {
            world.place(x, y, MaterialId::Wood);
        }
    }
    for x in 280..340 {
        world.place(x, height - 41, MaterialId::Fire);
    }
    world
}

fn bench_step(c: &mut Criterion) {
    c.bench_function("step 400x300 empty", |b| {
        let mut world = World::new(SimulationConfig::default()).expect("default config is valid");
        b.iter(|| {
            world.step();
        })
    });

    c.bench_function("step 400x300 busy", |b| {
        let mut world = busy_world();
        b.iter(|| black_box(world.step().cells_moved))
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
