//! Components used by the demo scene.

use harrax_macros::Component;

pub type Vec3 = [f32; 3];
pub type Colour = [f32; 4];

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: [1.0; 3],
            rotation: [0.0; 3],
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Velocity integration. Inactive bodies are skipped by the physics system.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Physics {
    pub active: bool,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

impl Physics {
    pub fn moving(velocity: Vec3) -> Self {
        Self {
            active: true,
            velocity,
            acceleration: [0.0; 3],
        }
    }
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Sprite {
    pub visible: bool,
    pub billboard: bool,
    pub colour: Colour,
}

impl Sprite {
    pub fn new(colour: Colour) -> Self {
        Self {
            visible: true,
            billboard: false,
            colour,
        }
    }
}

/// Emits one particle every `period` seconds from the owning entity's position.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ParticleEmitter {
    pub lifetime: f32,
    pub lifetime_variation: f32,
    pub speed: f32,
    pub speed_variation: f32,
    pub period: f32,
    pub elapsed: f32,
    pub direction: Vec3,
    pub direction_variation: Vec3,
    pub initial_colour: Colour,
    pub final_colour: Colour,
}

/// Linear colour fade over `period` seconds. When it completes the particle is retired.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Fade {
    pub active: bool,
    pub period: f32,
    pub elapsed: f32,
    pub initial: Colour,
    pub target: Colour,
}

impl Fade {
    /// The colour at the current point of the fade.
    pub fn colour(&self) -> Colour {
        let ratio = if self.period > 0.0 {
            (self.elapsed / self.period).min(1.0)
        } else {
            1.0
        };
        std::array::from_fn(|i| (1.0 - ratio) * self.initial[i] + ratio * self.target[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_interpolates_linearly() {
        // Given
        let mut fade = Fade {
            active: true,
            period: 2.0,
            elapsed: 0.0,
            initial: [1.0, 1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0, 0.0],
        };

        // Then
        assert_eq!(fade.colour(), [1.0; 4]);

        // When
        fade.elapsed = 1.0;

        // Then
        assert_eq!(fade.colour(), [0.5; 4]);

        // When - Overshooting clamps to the target
        fade.elapsed = 5.0;

        // Then
        assert_eq!(fade.colour(), [0.0; 4]);
    }
}
