//! Game world benchmark scenario.
//!
//! Simulates a mixed game world with:
//! - NPCs with health and team affiliation
//! - Static props carrying a model matrix
//! - Projectiles created every tick with short lifetimes
//!
//! This scenario tests:
//! - Several systems with different requirement masks
//! - Membership changes every tick, so every tick pays for a refresh
//! - Systems sharing a requirement mask sharing one scan

use harrax_engine::ecs::{Entity, Registry, system::Handle};
use harrax_macros::System;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{Health, Lifetime, Model, Position, Team, Velocity, register_all};
use crate::scenarios::Scenario;

/// Configuration for the game world benchmark.
pub struct GameWorldConfig {
    /// NPCs created during setup.
    pub npc_count: usize,
    /// Static props created during setup.
    pub prop_count: usize,
    /// Projectiles created every tick.
    pub projectiles_per_tick: usize,
    /// Number of teams NPCs are spread across.
    pub team_count: u32,
    /// Simulated delta time per tick.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for GameWorldConfig {
    fn default() -> Self {
        Self {
            npc_count: 5_000,
            prop_count: 5_000,
            projectiles_per_tick: 10,
            team_count: 4,
            delta_time: 1.0 / 60.0,
            seed: 42,
        }
    }
}

/// System: Apply velocity to position.
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

/// System: Regenerate health.
#[derive(System)]
#[requires(Health)]
struct Regeneration;

impl Regeneration {
    fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let health = registry.component_mut::<Health>(entity);
            health.current = (health.current + 5.0 * dt).min(health.max);
        }
    }
}

/// System: Tally the total health of each team.
#[derive(System)]
#[requires(Team, Health)]
struct TeamStrength {
    totals: Vec<f32>,
}

impl TeamStrength {
    fn update(&mut self, entities: &[Entity], registry: &Registry) {
        self.totals.iter_mut().for_each(|total| *total = 0.0);
        for &entity in entities {
            let team = registry.component::<Team>(entity).0 as usize;
            if let Some(total) = self.totals.get_mut(team) {
                *total += registry.component::<Health>(entity).current;
            }
        }
    }
}

/// System: Stop projectiles whose lifetime ran out.
#[derive(System)]
#[requires(Velocity, Lifetime)]
struct Expiry {
    expired: usize,
}

impl Expiry {
    fn update(&mut self, entities: &[Entity], registry: &mut Registry, dt: f32) {
        for &entity in entities {
            let lifetime = registry.component_mut::<Lifetime>(entity);
            if lifetime.remaining <= 0.0 {
                continue;
            }
            lifetime.remaining -= dt;
            if lifetime.remaining <= 0.0 {
                *registry.component_mut::<Velocity>(entity) = Velocity::default();
                self.expired += 1;
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Handles {
    movement: Handle<Movement>,
    regeneration: Handle<Regeneration>,
    strength: Handle<TeamStrength>,
    expiry: Handle<Expiry>,
}

/// Game world benchmark scenario.
pub struct GameWorldScenario {
    config: GameWorldConfig,
    registry: Registry,
    rng: ChaCha8Rng,
    handles: Option<Handles>,
}

impl GameWorldScenario {
    /// Create a new game world scenario with default config.
    pub fn new() -> Self {
        Self::with_config(GameWorldConfig::default())
    }

    /// Create a new game world scenario with custom config.
    pub fn with_config(config: GameWorldConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            registry: Registry::new(),
            handles: None,
        }
    }

    /// The registry driven by this scenario.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Total health per team as of the last tick.
    pub fn team_strength(&self) -> &[f32] {
        match self.handles {
            Some(handles) => &self.registry.system(handles.strength).totals,
            None => &[],
        }
    }

    /// The number of projectiles which have expired so far.
    pub fn expired(&self) -> usize {
        self.handles
            .map(|handles| self.registry.system(handles.expiry).expired)
            .unwrap_or_default()
    }

    fn create_projectile(&mut self) {
        let rng = &mut self.rng;
        let position = Position([rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0), 0.0]);
        let velocity = Velocity([rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), 0.0]);
        let lifetime = Lifetime {
            remaining: rng.gen_range(0.5..2.0),
            total: 2.0,
        };

        let registry = &mut self.registry;
        let projectile = registry.create();
        registry.add_component(projectile, position);
        registry.add_component(projectile, velocity);
        registry.add_component(projectile, lifetime);
    }
}

impl Default for GameWorldScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for GameWorldScenario {
    fn name(&self) -> &'static str {
        "game_world"
    }

    fn description(&self) -> &'static str {
        "Mixed NPCs, props and projectiles with per-tick membership changes"
    }

    fn entity_count(&self) -> usize {
        self.registry.entities().len()
    }

    fn setup(&mut self) {
        let registry = &mut self.registry;
        register_all(registry).expect("benchmark components fit the default limit");
        registry
            .register_system::<Movement>()
            .expect("benchmark systems fit the default limit");
        registry
            .register_system::<Regeneration>()
            .expect("benchmark systems fit the default limit");
        registry
            .register_system::<TeamStrength>()
            .expect("benchmark systems fit the default limit");
        registry
            .register_system::<Expiry>()
            .expect("benchmark systems fit the default limit");

        for _ in 0..self.config.npc_count {
            let npc = registry.create();
            let rng = &mut self.rng;
            registry.add_component(
                npc,
                Position([rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0), 0.0]),
            );
            registry.add_component(
                npc,
                Velocity([rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0]),
            );
            registry.add_component(
                npc,
                Health {
                    current: rng.gen_range(10.0..100.0),
                    max: 100.0,
                },
            );
            registry.add_component(npc, Team(rng.gen_range(0..self.config.team_count)));
        }

        for _ in 0..self.config.prop_count {
            let prop = registry.create();
            registry.add_component(prop, Position::default());
            registry.add_component(prop, Model::default());
        }

        self.handles = Some(Handles {
            movement: registry.create_system(Movement),
            regeneration: registry.create_system(Regeneration),
            strength: registry.create_system(TeamStrength {
                totals: vec![0.0; self.config.team_count as usize],
            }),
            expiry: registry.create_system(Expiry { expired: 0 }),
        });
    }

    fn update(&mut self) {
        let Some(handles) = self.handles else {
            return;
        };
        let dt = self.config.delta_time;

        for _ in 0..self.config.projectiles_per_tick {
            self.create_projectile();
        }

        let registry = &mut self.registry;
        registry.update();
        registry.run(handles.movement, |system, entities, registry| {
            system.update(entities, registry, dt)
        });
        registry.run(handles.regeneration, |system, entities, registry| {
            system.update(entities, registry, dt)
        });
        registry.run(handles.strength, |system, entities, registry| {
            system.update(entities, registry)
        });
        registry.run(handles.expiry, |system, entities, registry| {
            system.update(entities, registry, dt)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GameWorldScenario {
        GameWorldScenario::with_config(GameWorldConfig {
            npc_count: 100,
            prop_count: 50,
            projectiles_per_tick: 5,
            delta_time: 0.5,
            ..Default::default()
        })
    }

    #[test]
    fn game_world_setup() {
        let mut scenario = small();

        scenario.setup();

        assert_eq!(scenario.entity_count(), 150);
        assert_eq!(scenario.registry().query::<(Team, Health)>().len(), 100);
        assert_eq!(scenario.registry().query::<Model>().len(), 50);
    }

    #[test]
    fn game_world_update() {
        let mut scenario = small();
        scenario.setup();

        for _ in 0..10 {
            scenario.update();
        }

        assert_eq!(scenario.entity_count(), 200);
        assert_eq!(scenario.team_strength().len(), 4);
        assert!(scenario.team_strength().iter().sum::<f32>() > 0.0);
        // Projectiles live at most two seconds, the earliest ones have expired
        assert!(scenario.expired() >= 5);
    }
}
