//! The Registry is the single entry point to the ECS.
//!
//! A `Registry` exclusively owns the entity table, the component directory (and every component
//! pool) and the system directory. It is constructed explicitly by the application and passed to
//! whatever needs it; there is no global instance.
//!
//! # Refresh protocol
//!
//! System entity lists are cached. Creating an entity or attaching a new component marks the
//! registry dirty, and [`Registry::update`] recomputes every cached list once per call while
//! dirty. Between an attach and the next update, cached lists are stale.
//!
//! # Example
//!
//! ```ignore
//! use harrax_engine::ecs::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register_component::<Transform>()?;
//! registry.register_component::<Physics>()?;
//! registry.register_system::<PhysicsSystem>()?;
//!
//! let ball = registry.create();
//! registry.add_component(ball, Transform::default());
//! registry.add_component(ball, Physics::default());
//!
//! let physics = registry.create_system(PhysicsSystem::default());
//!
//! // Once per fixed tick
//! registry.update();
//! registry.run(physics, |system, entities, registry| system.step(entities, registry, DT));
//! ```

use std::any::type_name;

use log::debug;

use crate::ecs::{
    component::{self, Component, IntoSpec},
    config::Config,
    entity::{self, Entity},
    error::CapacityError,
    query::{Fetch, Mask},
    system::{self, System},
};

/// The ECS facade. See the [module documentation](self) for an overview.
pub struct Registry {
    /// The limits this registry was built with.
    config: Config,

    /// Every created entity and its membership mask.
    entities: entity::Table,

    /// Component ids and pools.
    components: component::Directory,

    /// System types, instances and cached entity lists.
    systems: system::Directory,

    /// Set when membership changed since the last refresh.
    dirty: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Construct a registry with the default limits.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Construct a registry with explicit limits.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            entities: entity::Table::new(config.max_components),
            components: component::Directory::new(config.max_components),
            systems: system::Directory::new(config.max_systems),
            dirty: false,
        }
    }

    /// The limits this registry enforces.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The entity table.
    #[inline]
    pub fn entities(&self) -> &entity::Table {
        &self.entities
    }

    /// The component directory.
    #[inline]
    pub fn components(&self) -> &component::Directory {
        &self.components
    }

    /// The system directory.
    #[inline]
    pub fn systems(&self) -> &system::Directory {
        &self.systems
    }

    /// Create a new entity with no components.
    pub fn create(&mut self) -> Entity {
        self.dirty = true;
        self.entities.create()
    }

    /// Register a component type. Idempotent; refused and logged once the component limit is
    /// reached.
    #[inline]
    pub fn register_component<C: Component>(&mut self) -> Result<component::Id, CapacityError> {
        self.components.register::<C>()
    }

    /// Get the id of a registered component type.
    ///
    /// # Panics
    /// - If `C` was never registered.
    #[inline]
    pub fn component_id<C: Component>(&self) -> component::Id {
        self.components.id::<C>()
    }

    /// Determine if the entity owns a `C` component.
    ///
    /// # Panics
    /// - If `C` was never registered or the entity was never created.
    #[inline]
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.entities.has(entity, self.components.id::<C>())
    }

    /// Attach a component to an entity.
    ///
    /// If the entity already owns a `C`, this is a no-op and the stored value is left untouched.
    /// Returns `true` if the component was attached.
    ///
    /// # Panics
    /// - If `C` was never registered or the entity was never created.
    pub fn add_component<C: Component>(&mut self, entity: Entity, value: C) -> bool {
        let id = self.components.id::<C>();
        if !self.entities.insert(entity, id) {
            return false;
        }
        self.components.pool_mut::<C>().insert(entity.index(), value);
        self.dirty = true;
        true
    }

    /// Get an entity's component.
    ///
    /// # Panics
    /// - If the entity does not own a `C`. Use [`try_component`](Self::try_component) to probe.
    pub fn component<C: Component>(&self, entity: Entity) -> &C {
        match self.try_component::<C>(entity) {
            Some(value) => value,
            None => panic!(
                "attempted to access component '{}' which has not been added to entity {}",
                type_name::<C>(),
                entity
            ),
        }
    }

    /// Get an entity's component mutably.
    ///
    /// # Panics
    /// - If the entity does not own a `C`.
    pub fn component_mut<C: Component>(&mut self, entity: Entity) -> &mut C {
        let owned = self.has_component::<C>(entity);
        match self.components.pool_mut::<C>().get_mut(entity.index()) {
            Some(value) if owned => value,
            _ => panic!(
                "attempted to access component '{}' which has not been added to entity {}",
                type_name::<C>(),
                entity
            ),
        }
    }

    /// Get an entity's component, or `None` if the entity does not own one.
    pub fn try_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        if !self.has_component::<C>(entity) {
            return None;
        }
        self.components.pool::<C>().get(entity.index())
    }

    /// Compute the membership mask implied by a set of component types.
    #[inline]
    pub fn mask<S: IntoSpec>(&self) -> Mask {
        self.mask_of(&S::into_spec(&self.components))
    }

    /// Collect every entity owning all components in `S`, in creation order.
    #[inline]
    pub fn query<S: IntoSpec>(&self) -> Vec<Entity> {
        self.query_mask(&self.mask::<S>())
    }

    /// Collect every entity whose mask is a superset of `required`, in creation order.
    pub fn query_mask(&self, required: &Mask) -> Vec<Entity> {
        debug_assert!(
            required.ids().all(|id| id.index() < self.components.len()),
            "query mask references an unregistered component"
        );
        self.entities.query(required)
    }

    /// Visit every entity owning the components fetched by `F`, in creation order.
    ///
    /// ```rust,ignore
    /// registry.view::<(&Transform, &Sprite)>(|entity, (transform, sprite)| {
    ///     // ...
    /// });
    /// ```
    pub fn view<'w, F: Fetch>(&'w self, mut each: impl FnMut(Entity, F::Value<'w>)) {
        let required = self.mask_of(&F::spec(&self.components));
        for entity in self.entities.matching(&required) {
            each(entity, F::fetch(&self.components, entity));
        }
    }

    /// Register a system type, resolving its required components once. Idempotent; refused and
    /// logged once the system limit is reached.
    ///
    /// # Panics
    /// - If a component required by `S` is not registered.
    #[inline]
    pub fn register_system<S: System>(&mut self) -> Result<system::Id, CapacityError> {
        self.systems.register::<S>(&self.components)
    }

    /// Store a system instance and populate its cached entity list.
    ///
    /// # Panics
    /// - If `S` was never registered.
    #[inline]
    pub fn create_system<S: System>(&mut self, system: S) -> system::Handle<S> {
        self.systems.create(system, &self.entities)
    }

    /// Get a system instance.
    #[inline]
    pub fn system<S: System>(&self, handle: system::Handle<S>) -> &S {
        self.systems.get(handle)
    }

    /// Get a system instance mutably.
    #[inline]
    pub fn system_mut<S: System>(&mut self, handle: system::Handle<S>) -> &mut S {
        self.systems.get_mut(handle)
    }

    /// Get a system's cached entity list as of the last refresh (or its creation).
    #[inline]
    pub fn system_entities<S: System>(&self, handle: system::Handle<S>) -> &[Entity] {
        self.systems.entities(handle)
    }

    /// Run a pass of a system: the instance, its cached entity list and the registry are lent to
    /// `pass` for its duration.
    ///
    /// # Panics
    /// - If the same instance is run re-entrantly from inside `pass`.
    pub fn run<S: System, R>(
        &mut self,
        handle: system::Handle<S>,
        pass: impl FnOnce(&mut S, &[Entity], &mut Registry) -> R,
    ) -> R {
        let (mut system, entities) = self.systems.lend(handle);
        let result = pass(&mut *system, &entities, self);
        self.systems.restore(handle, system);
        result
    }

    /// Recompute every system's cached entity list if membership changed since the last refresh.
    ///
    /// Returns `false` without doing anything when the registry is not dirty.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        let scans = self.systems.refresh(&self.entities);
        debug!(
            "Refreshed {} systems over {} entities ({} scans)",
            self.systems.instance_count(),
            self.entities.len(),
            scans
        );
        self.dirty = false;
        true
    }

    /// Whether membership changed since the last refresh.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mask_of(&self, spec: &component::Spec) -> Mask {
        Mask::from_spec(spec, self.components.limit())
    }
}

#[cfg(test)]
mod tests {
    use harrax_macros::{Component, System};

    use super::*;

    #[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Tag;

    #[derive(System, Default)]
    #[requires(Position, Velocity)]
    struct Movement {
        runs: u32,
    }

    impl Movement {
        fn step(&mut self, entities: &[Entity], registry: &mut Registry) {
            self.runs += 1;
            for &entity in entities {
                let velocity = *registry.component::<Velocity>(entity);
                let position = registry.component_mut::<Position>(entity);
                position.x += velocity.dx;
                position.y += velocity.dy;
            }
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_component::<Position>().unwrap();
        registry.register_component::<Velocity>().unwrap();
        registry.register_component::<Tag>().unwrap();
        registry.register_system::<Movement>().unwrap();
        registry
    }

    #[test]
    fn create_returns_sequential_ids() {
        // Given
        let mut registry = registry();

        // When
        let ids: Vec<_> = (0..10).map(|_| registry.create()).collect();

        // Then
        assert_eq!(ids, (0..10).map(Entity::new).collect::<Vec<_>>());
    }

    #[test]
    fn never_attached_component_is_absent() {
        // Given
        let mut registry = registry();
        let entity = registry.create();
        registry.add_component(entity, Position::default());

        // Then
        assert!(registry.has_component::<Position>(entity));
        assert!(!registry.has_component::<Velocity>(entity));
        assert!(registry.try_component::<Velocity>(entity).is_none());
    }

    #[test]
    fn second_attach_keeps_first_value() {
        // Given
        let mut registry = registry();
        let entity = registry.create();

        // When
        let first = registry.add_component(entity, Position { x: 1.0, y: 1.0 });
        let second = registry.add_component(entity, Position { x: 2.0, y: 2.0 });

        // Then
        assert!(first);
        assert!(!second);
        assert!(registry.has_component::<Position>(entity));
        assert_eq!(
            registry.component::<Position>(entity),
            &Position { x: 1.0, y: 1.0 }
        );
    }

    #[test]
    fn component_mut_edits_in_place() {
        // Given
        let mut registry = registry();
        let entity = registry.create();
        registry.add_component(entity, Position::default());

        // When
        registry.component_mut::<Position>(entity).x = 3.0;

        // Then
        assert_eq!(registry.component::<Position>(entity).x, 3.0);
    }

    #[test]
    #[should_panic(expected = "has not been added")]
    fn missing_component_panics() {
        let mut registry = registry();
        let entity = registry.create();
        registry.component::<Velocity>(entity);
    }

    #[test]
    #[should_panic(expected = "has not been added")]
    fn missing_component_mut_panics() {
        // Given - Another entity grows the pool past this one
        let mut registry = registry();
        let entity = registry.create();
        let other = registry.create();
        registry.add_component(other, Velocity::default());

        // When
        registry.component_mut::<Velocity>(entity);
    }

    #[test]
    fn query_and_mask() {
        // Given
        let mut registry = registry();
        let e0 = registry.create();
        let e1 = registry.create();
        registry.add_component(e0, Position::default());
        registry.add_component(e1, Position::default());
        registry.add_component(e1, Tag);

        // Then
        assert_eq!(registry.query::<Position>(), vec![e0, e1]);
        assert_eq!(registry.query::<(Tag, Position)>(), vec![e1]);
        assert_eq!(registry.query::<()>(), vec![e0, e1]);
        assert_eq!(registry.mask::<(Position, Tag)>().len(), 2);
    }

    #[test]
    fn view_visits_matches_in_creation_order() {
        // Given
        let mut registry = registry();
        for i in 0..4 {
            let entity = registry.create();
            registry.add_component(entity, Position { x: i as f32, y: 0.0 });
            if i % 2 == 1 {
                registry.add_component(entity, Velocity { dx: 1.0, dy: 0.0 });
            }
        }

        // When
        let mut seen = Vec::new();
        registry.view::<(&Position, &Velocity)>(|entity, (position, velocity)| {
            seen.push((entity, position.x, velocity.dx));
        });

        // Then
        assert_eq!(
            seen,
            vec![(Entity::new(1), 1.0, 1.0), (Entity::new(3), 3.0, 1.0)]
        );
    }

    #[test]
    fn update_refreshes_only_when_dirty() {
        // Given
        let mut registry = registry();
        let movement = registry.create_system(Movement::default());
        assert!(!registry.is_dirty());

        // When
        let entity = registry.create();
        registry.add_component(entity, Position::default());
        registry.add_component(entity, Velocity::default());

        // Then - Stale until refreshed
        assert!(registry.is_dirty());
        assert!(registry.system_entities(movement).is_empty());

        // When
        assert!(registry.update());

        // Then
        assert!(!registry.is_dirty());
        assert_eq!(registry.system_entities(movement), &[entity]);
        assert!(!registry.update());
    }

    #[test]
    fn repeated_attach_does_not_dirty() {
        // Given
        let mut registry = registry();
        let entity = registry.create();
        registry.add_component(entity, Tag);
        registry.update();

        // When
        registry.add_component(entity, Tag);

        // Then
        assert!(!registry.is_dirty());
    }

    #[test]
    fn run_lends_system_entities_and_registry() {
        // Given
        let mut registry = registry();
        let entity = registry.create();
        registry.add_component(entity, Position::default());
        registry.add_component(entity, Velocity { dx: 2.0, dy: -1.0 });
        let movement = registry.create_system(Movement::default());

        // When
        registry.run(movement, |system, entities, registry| {
            system.step(entities, registry)
        });

        // Then
        assert_eq!(registry.system(movement).runs, 1);
        assert_eq!(
            registry.component::<Position>(entity),
            &Position { x: 2.0, y: -1.0 }
        );
        registry.system_mut(movement).runs = 0;
        assert_eq!(registry.system(movement).runs, 0);
    }
}
