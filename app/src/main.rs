//! Headless Harrax demo: a handful of falling bodies and two particle fountains, stepped at a
//! fixed 60Hz for a number of ticks.
//!
//! ```bash
//! cargo run -p harrax -- 600
//! ```

mod components;
mod systems;

use harrax_engine::ecs::{CapacityError, Registry};
use log::{Level, error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use components::{Fade, ParticleEmitter, Physics, Sprite, Transform};
use systems::{FadeSystem, ParticleEmitterSystem, PhysicsSystem, SpriteRenderSystem};

const FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_TICKS: u32 = 600;
const MAX_PARTICLES: usize = 4 * 1024;
const BODIES: usize = 32;
const SEED: u64 = 12345;

fn register(registry: &mut Registry) -> Result<(), CapacityError> {
    registry.register_component::<Transform>()?;
    registry.register_component::<Physics>()?;
    registry.register_component::<Sprite>()?;
    registry.register_component::<ParticleEmitter>()?;
    registry.register_component::<Fade>()?;

    registry.register_system::<PhysicsSystem>()?;
    registry.register_system::<ParticleEmitterSystem>()?;
    registry.register_system::<FadeSystem>()?;
    registry.register_system::<SpriteRenderSystem>()?;
    Ok(())
}

fn populate(registry: &mut Registry, rng: &mut ChaCha8Rng) {
    for _ in 0..BODIES {
        let body = registry.create();
        registry.add_component(
            body,
            Transform::at([rng.gen_range(-10.0..10.0), 10.0, rng.gen_range(-10.0..10.0)]),
        );
        registry.add_component(
            body,
            Physics::moving([rng.gen_range(-2.0..2.0), rng.gen_range(0.0..5.0), 0.0]),
        );
        registry.add_component(body, Sprite::new([rng.r#gen(), rng.r#gen(), rng.r#gen(), 1.0]));
    }

    for (x, colour) in [(-4.0, [1.0, 0.5, 0.1, 1.0]), (4.0, [0.1, 0.5, 1.0, 1.0])] {
        let fountain = registry.create();
        registry.add_component(fountain, Transform::at([x, 0.0, 0.0]));
        registry.add_component(
            fountain,
            ParticleEmitter {
                lifetime: 2.0,
                lifetime_variation: 0.5,
                speed: 6.0,
                speed_variation: 1.5,
                period: 0.02,
                elapsed: 0.0,
                direction: [0.0, 1.0, 0.0],
                direction_variation: [0.3, 0.1, 0.3],
                initial_colour: colour,
                final_colour: [colour[0], colour[1], colour[2], 0.0],
            },
        );
    }
}

fn main() {
    harrax_engine::core::log::init(Level::Info);

    let ticks = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut registry = Registry::new();
    if let Err(error) = register(&mut registry) {
        error!("{error}");
        std::process::exit(1);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    populate(&mut registry, &mut rng);

    let emitter = ParticleEmitterSystem::new(&mut registry, MAX_PARTICLES, rng.r#gen());
    let physics = registry.create_system(PhysicsSystem::default());
    let emitters = registry.create_system(emitter);
    let fade = registry.create_system(FadeSystem::default());
    let render = registry.create_system(SpriteRenderSystem::default());

    info!(
        "Simulating {} ticks over {} entities",
        ticks,
        registry.entities().len()
    );

    let mut refreshes = 0;
    let mut peak_visible = 0;
    for _ in 0..ticks {
        if registry.update() {
            refreshes += 1;
        }
        registry.run(emitters, |system, entities, registry| {
            system.update(entities, registry, FIXED_DT)
        });
        registry.run(physics, |system, entities, registry| {
            system.update(entities, registry, FIXED_DT)
        });
        registry.run(fade, |system, entities, registry| {
            system.update(entities, registry, FIXED_DT)
        });
        let visible = registry.run(render, |system, entities, registry| {
            system.render(entities, registry)
        });
        peak_visible = peak_visible.max(visible);
    }

    let mut airborne = 0;
    let mut lowest = f32::INFINITY;
    registry.view::<(&Transform, &Physics)>(|_, (transform, physics)| {
        if physics.active {
            airborne += 1;
            lowest = lowest.min(transform.position[1]);
        }
    });

    info!(
        "Simulated {:.1}s: {} particles emitted, {} retired, {} refreshes",
        ticks as f32 * FIXED_DT,
        registry.system(emitters).emitted(),
        registry.system(fade).retired(),
        refreshes
    );
    info!(
        "{} bodies in motion (lowest at y = {:.2}), peak of {} visible sprites, {} submitted",
        airborne,
        lowest,
        peak_visible,
        registry.system(render).submitted()
    );
}
