//! Realistic game scenario benchmarks.
//!
//! These scenarios simulate real-world ECS usage patterns with representative
//! entity counts, component combinations, and system workloads.
//!
//! # Scenarios
//!
//! - **Particles**: A fixed ring of particles with movement, lifetime and fade passes
//! - **Game World**: Mixed component sets, several systems, entities created every tick

pub mod game_world;
pub mod particles;

pub use game_world::{GameWorldConfig, GameWorldScenario};
pub use particles::{ParticleConfig, ParticleScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of entities in this scenario.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (create entities and systems).
    fn setup(&mut self);

    /// Run one fixed tick of the scenario.
    fn update(&mut self);
}
