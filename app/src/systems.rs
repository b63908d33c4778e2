//! Systems driving the demo scene.

use harrax_engine::ecs::{Entity, Registry};
use harrax_macros::System;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{Fade, ParticleEmitter, Physics, Sprite, Transform, Vec3};

pub const GRAVITY: Vec3 = [0.0, -9.81, 0.0];

/// Integrates acceleration and gravity into velocity, then velocity into position.
#[derive(System, Debug)]
#[requires(Transform, Physics)]
pub struct PhysicsSystem {
    gravity: Vec3,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self { gravity: GRAVITY }
    }
}

impl PhysicsSystem {
    pub fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let physics = registry.component_mut::<Physics>(entity);
            if !physics.active {
                continue;
            }
            for axis in 0..3 {
                physics.velocity[axis] += (physics.acceleration[axis] + self.gravity[axis]) * dt;
            }
            let velocity = physics.velocity;

            let transform = registry.component_mut::<Transform>(entity);
            for axis in 0..3 {
                transform.position[axis] += velocity[axis] * dt;
            }
        }
    }
}

/// Emits particles from every entity owning a [`ParticleEmitter`].
///
/// Particles are a fixed ring of entities created up front; emitting reuses the oldest slot
/// whether or not its previous particle has finished fading.
#[derive(System)]
#[requires(Transform, ParticleEmitter)]
pub struct ParticleEmitterSystem {
    particles: Vec<Entity>,
    next: usize,
    emitted: usize,
    rng: ChaCha8Rng,
}

impl ParticleEmitterSystem {
    /// Create `capacity` dormant particle entities in `registry`.
    pub fn new(registry: &mut Registry, capacity: usize, seed: u64) -> Self {
        let particles = (0..capacity)
            .map(|_| {
                let entity = registry.create();
                registry.add_component(entity, Transform::default());
                registry.add_component(entity, Physics::default());
                registry.add_component(
                    entity,
                    Sprite {
                        visible: false,
                        billboard: true,
                        colour: [0.0; 4],
                    },
                );
                registry.add_component(entity, Fade::default());
                entity
            })
            .collect();
        debug!("Created a ring of {} particles", capacity);

        Self {
            particles,
            next: 0,
            emitted: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The total number of particles emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// The particle entities in ring order.
    pub fn particles(&self) -> &[Entity] {
        &self.particles
    }

    pub fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let emitter = *registry.component::<ParticleEmitter>(entity);
            if emitter.elapsed >= emitter.period && !self.particles.is_empty() {
                let origin = registry.component::<Transform>(entity).position;
                self.emit(&emitter, origin, registry);
                registry.component_mut::<ParticleEmitter>(entity).elapsed = 0.0;
            }
            registry.component_mut::<ParticleEmitter>(entity).elapsed += dt;
        }
    }

    fn emit(&mut self, emitter: &ParticleEmitter, origin: Vec3, registry: &mut Registry) {
        let particle = self.particles[self.next];
        self.next = (self.next + 1) % self.particles.len();
        self.emitted += 1;

        let transform = registry.component_mut::<Transform>(particle);
        transform.position = origin;
        transform.scale = [0.1; 3];

        let speed = emitter.speed + self.jitter() * emitter.speed_variation;
        let mut direction = emitter.direction;
        for axis in 0..3 {
            direction[axis] += emitter.direction_variation[axis] * self.jitter();
        }
        let physics = registry.component_mut::<Physics>(particle);
        physics.active = true;
        physics.velocity = direction.map(|component| component * speed);

        let sprite = registry.component_mut::<Sprite>(particle);
        sprite.visible = true;
        sprite.colour = emitter.initial_colour;

        let lifetime = emitter.lifetime + self.jitter() * emitter.lifetime_variation;
        *registry.component_mut::<Fade>(particle) = Fade {
            active: true,
            period: lifetime,
            elapsed: 0.0,
            initial: emitter.initial_colour,
            target: emitter.final_colour,
        };
    }

    fn jitter(&mut self) -> f32 {
        self.rng.gen_range(-1.0..1.0)
    }
}

/// Fades sprite colours and retires particles whose fade has completed.
#[derive(System, Debug, Default)]
#[requires(Sprite, Fade)]
pub struct FadeSystem {
    retired: usize,
}

impl FadeSystem {
    /// The total number of fades which have completed.
    pub fn retired(&self) -> usize {
        self.retired
    }

    pub fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let fade = *registry.component::<Fade>(entity);
            if !fade.active {
                continue;
            }

            if fade.elapsed >= fade.period {
                let sprite = registry.component_mut::<Sprite>(entity);
                sprite.colour = fade.target;
                sprite.visible = false;
                registry.component_mut::<Fade>(entity).active = false;
                if registry.has_component::<Physics>(entity) {
                    registry.component_mut::<Physics>(entity).active = false;
                }
                self.retired += 1;
                continue;
            }

            registry.component_mut::<Sprite>(entity).colour = fade.colour();
            registry.component_mut::<Fade>(entity).elapsed += dt;
        }
    }
}

/// Collects what a renderer would submit this frame. The demo is headless, so it only counts.
#[derive(System, Debug, Default)]
#[requires(Transform, Sprite)]
pub struct SpriteRenderSystem {
    submitted: usize,
}

impl SpriteRenderSystem {
    /// Returns the number of visible sprites this pass.
    pub fn render(&mut self, entities: &[Entity], registry: &Registry) -> usize {
        let visible = entities
            .iter()
            .filter(|&&entity| registry.component::<Sprite>(entity).visible)
            .count();
        self.submitted += visible;
        visible
    }

    /// The total number of sprites submitted across every pass.
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}
