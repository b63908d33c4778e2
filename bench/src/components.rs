//! Component types shared by the benchmarks, sized like the demo's own components.

use harrax_engine::ecs::{CapacityError, Registry};
use harrax_macros::Component;

/// World position (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position(pub [f32; 3]);

/// Linear velocity (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity(pub [f32; 3]);

impl Position {
    /// Advance by `velocity` over `dt` seconds.
    #[inline]
    pub fn integrate(&mut self, velocity: &Velocity, dt: f32) {
        for (p, v) in self.0.iter_mut().zip(velocity.0) {
            *p += v * dt;
        }
    }
}

/// Column-major model matrix (64 bytes), the heaviest component in the set.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Model(pub [[f32; 4]; 4]);

impl Default for Model {
    fn default() -> Self {
        Self(std::array::from_fn(|col| {
            std::array::from_fn(|row| if row == col { 1.0 } else { 0.0 })
        }))
    }
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Team(pub u32);

/// Seconds left out of a total lifetime.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// RGBA colour (16 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Colour(pub [f32; 4]);

/// Register every benchmark component with `registry`.
pub fn register_all(registry: &mut Registry) -> Result<(), CapacityError> {
    registry.register_component::<Position>()?;
    registry.register_component::<Velocity>()?;
    registry.register_component::<Model>()?;
    registry.register_component::<Health>()?;
    registry.register_component::<Team>()?;
    registry.register_component::<Lifetime>()?;
    registry.register_component::<Colour>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_scales_by_dt() {
        let mut position = Position([1.0, 2.0, 3.0]);
        position.integrate(&Velocity([2.0, 0.0, -4.0]), 0.5);
        assert_eq!(position, Position([2.0, 2.0, 1.0]));
    }

    #[test]
    fn model_defaults_to_identity() {
        let model = Model::default();
        assert_eq!(model.0[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.0[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
