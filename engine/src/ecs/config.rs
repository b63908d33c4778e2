//! Capacity configuration for a [`Registry`](crate::ecs::Registry).

/// The default maximum number of distinct component types. This is also the width of every
/// entity membership mask.
pub const MAX_COMPONENTS: usize = 64;

/// The default maximum number of distinct system types.
pub const MAX_SYSTEMS: usize = 64;

/// Limits a registry enforces when component and system types are registered.
///
/// Exceeding either limit is a registration-time failure: the registration is refused and logged,
/// never silently truncated.
///
/// ```rust,ignore
/// let registry = Registry::with_config(Config::default().with_max_components(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of component types, and the membership mask width.
    pub max_components: usize,

    /// Maximum number of system types.
    pub max_systems: usize,
}

impl Config {
    /// Construct a configuration with explicit limits.
    #[inline]
    pub const fn new(max_components: usize, max_systems: usize) -> Self {
        Self {
            max_components,
            max_systems,
        }
    }

    /// Replace the component type limit.
    #[inline]
    pub const fn with_max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }

    /// Replace the system type limit.
    #[inline]
    pub const fn with_max_systems(mut self, max_systems: usize) -> Self {
        self.max_systems = max_systems;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MAX_COMPONENTS, MAX_SYSTEMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let config = Config::default();
        assert_eq!(config.max_components, 64);
        assert_eq!(config.max_systems, 64);
    }

    #[test]
    fn builder_overrides() {
        // When
        let config = Config::default().with_max_components(2).with_max_systems(3);

        // Then
        assert_eq!(config, Config::new(2, 3));
    }
}
