//! Particle system benchmark scenario.
//!
//! Simulates a high-volume particle system with:
//! - A fixed ring of particles created up front: Position, Velocity, Lifetime, Colour
//! - Systems: movement, lifetime decay (expired particles are re-rolled in place), fade
//!
//! This scenario tests:
//! - High entity count iteration over cached system lists
//! - Simple component access patterns
//! - Steady state ticks where membership never changes and refresh is skipped

use harrax_engine::ecs::{Entity, Registry, system::Handle};
use harrax_macros::System;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{Colour, Lifetime, Position, Velocity, register_all};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles in the ring.
    pub particle_count: usize,
    /// Simulated delta time per tick.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            delta_time: 1.0 / 60.0, // 60 FPS
            seed: 12345,
        }
    }
}

struct ParticleFactory(ChaCha8Rng);

impl ParticleFactory {
    fn roll(&mut self) -> (Position, Velocity, Lifetime, Colour) {
        let rng = &mut self.0;
        let pos = Position(std::array::from_fn(|_| rng.gen_range(-100.0..100.0)));
        let vel = Velocity(std::array::from_fn(|_| rng.gen_range(-10.0..10.0)));
        let lifetime = Lifetime {
            remaining: rng.gen_range(1.0..5.0),
            total: 5.0,
        };
        let colour = Colour([rng.r#gen(), rng.r#gen(), rng.r#gen(), 1.0]);

        (pos, vel, lifetime, colour)
    }
}

/// System: Update particle positions based on velocity.
#[derive(System)]
#[requires(Position, Velocity)]
struct Movement;

impl Movement {
    fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let vel = *registry.component::<Velocity>(entity);
            registry.component_mut::<Position>(entity).integrate(&vel, dt);
        }
    }
}

/// System: Decay particle lifetimes and re-roll expired particles in place.
#[derive(System)]
#[requires(Position, Velocity, Lifetime)]
struct LifetimeDecay {
    factory: ParticleFactory,
    respawned: usize,
}

impl LifetimeDecay {
    fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let lifetime = registry.component_mut::<Lifetime>(entity);
            lifetime.remaining -= dt;
            if lifetime.remaining > 0.0 {
                continue;
            }

            let (pos, vel, lifetime, colour) = self.factory.roll();
            *registry.component_mut::<Position>(entity) = pos;
            *registry.component_mut::<Velocity>(entity) = vel;
            *registry.component_mut::<Lifetime>(entity) = lifetime;
            if registry.has_component::<Colour>(entity) {
                *registry.component_mut::<Colour>(entity) = colour;
            }
            self.respawned += 1;
        }
    }
}

/// System: Fade particles based on remaining lifetime.
#[derive(System)]
#[requires(Lifetime, Colour)]
struct Fade;

impl Fade {
    fn update(&mut self, entities: &[Entity], registry: &mut Registry) {
        for &entity in entities {
            let lifetime = *registry.component::<Lifetime>(entity);
            registry.component_mut::<Colour>(entity).0[3] =
                (lifetime.remaining / lifetime.total).max(0.0);
        }
    }
}

#[derive(Clone, Copy)]
struct Handles {
    movement: Handle<Movement>,
    decay: Handle<LifetimeDecay>,
    fade: Handle<Fade>,
}

/// Particle system benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    registry: Registry,
    handles: Option<Handles>,
}

impl ParticleScenario {
    /// Create a new particle scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create a new particle scenario with custom config.
    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            handles: None,
        }
    }

    /// Get current particle count.
    pub fn current_count(&self) -> usize {
        self.registry.entities().len()
    }

    /// The number of particles re-rolled after expiring.
    pub fn respawned(&self) -> usize {
        self.handles
            .map(|handles| self.registry.system(handles.decay).respawned)
            .unwrap_or_default()
    }

    /// The registry driven by this scenario.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "High-volume particle ring with movement, lifetime, and fade"
    }

    fn entity_count(&self) -> usize {
        self.config.particle_count
    }

    fn setup(&mut self) {
        let registry = &mut self.registry;
        register_all(registry).expect("benchmark components fit the default limit");
        registry
            .register_system::<Movement>()
            .expect("benchmark systems fit the default limit");
        registry
            .register_system::<LifetimeDecay>()
            .expect("benchmark systems fit the default limit");
        registry
            .register_system::<Fade>()
            .expect("benchmark systems fit the default limit");

        let mut factory = ParticleFactory(ChaCha8Rng::seed_from_u64(self.config.seed));
        for _ in 0..self.config.particle_count {
            let (pos, vel, lifetime, colour) = factory.roll();
            let entity = registry.create();
            registry.add_component(entity, pos);
            registry.add_component(entity, vel);
            registry.add_component(entity, lifetime);
            registry.add_component(entity, colour);
        }

        self.handles = Some(Handles {
            movement: registry.create_system(Movement),
            decay: registry.create_system(LifetimeDecay {
                factory,
                respawned: 0,
            }),
            fade: registry.create_system(Fade),
        });
    }

    fn update(&mut self) {
        let Some(handles) = self.handles else {
            return;
        };
        let dt = self.config.delta_time;
        let registry = &mut self.registry;

        registry.update();
        registry.run(handles.movement, |system, entities, registry| {
            system.update(entities, registry, dt)
        });
        registry.run(handles.decay, |system, entities, registry| {
            system.update(entities, registry, dt)
        });
        registry.run(handles.fade, |system, entities, registry| {
            system.update(entities, registry)
        });
    }
}
