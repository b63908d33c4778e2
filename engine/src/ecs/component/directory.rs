use std::any::{TypeId, type_name};

use dashmap::DashMap;
use log::{debug, warn};

use crate::ecs::{
    component::{Component, ErasedPool, Id, Info, Pool},
    error::{CapacityError, Kind},
};

/// The component directory. Maps each registered component type to its [`Id`] and exclusively
/// owns the [`Pool`] storing that type's values.
///
/// Types are keyed by their Rust `TypeId`, so two distinct types can never share an id, and the
/// type name is kept alongside for diagnostics. Ids are handed out in registration order and are
/// bounded by the directory's limit (the membership mask width). Registration beyond the limit is
/// refused and logged.
pub struct Directory {
    /// Map from TypeId to component Id.
    type_map: DashMap<TypeId, Id>,

    /// Registered component metadata, indexed by [`Id`].
    infos: Vec<Info>,

    /// One pool per registered component, indexed by [`Id`].
    pools: Vec<Box<dyn ErasedPool>>,

    /// Maximum number of component types this directory accepts.
    limit: usize,
}

impl Directory {
    /// Create a new, empty directory accepting at most `limit` component types.
    #[inline]
    pub fn new(limit: usize) -> Self {
        Self {
            type_map: DashMap::new(),
            infos: Vec::new(),
            pools: Vec::new(),
            limit,
        }
    }

    /// Register a component type and get its unique identifier.
    ///
    /// If the component type is already registered, returns the existing ID. If the directory is
    /// full, the registration is refused with a [`CapacityError`] and a warning is logged.
    pub fn register<C: Component>(&mut self) -> Result<Id, CapacityError> {
        if let Some(id) = self.try_id::<C>() {
            return Ok(id);
        }

        let name = type_name::<C>();
        if self.infos.len() >= self.limit {
            warn!(
                "Failed to register component '{}'. Increase the limit (currently {})!",
                name, self.limit
            );
            return Err(CapacityError::new(Kind::Component, name, self.limit));
        }

        let id = Id::from(self.infos.len());
        self.infos.push(Info::new::<C>(id));
        self.pools.push(Box::new(Pool::<C>::new()));
        self.type_map.insert(TypeId::of::<C>(), id);
        debug!("Registered component '{}' as {:?}", name, id);

        Ok(id)
    }

    /// Get the component ID for a provided type `C`, if registered.
    #[inline]
    pub fn try_id<C: Component>(&self) -> Option<Id> {
        self.type_map
            .get(&TypeId::of::<C>())
            .map(|entry| *entry.value())
    }

    /// Get the component ID for a provided type `C`.
    ///
    /// # Panics
    /// - If `C` was never registered. Registration must precede first use.
    #[inline]
    pub fn id<C: Component>(&self) -> Id {
        match self.try_id::<C>() {
            Some(id) => id,
            None => panic!("component '{}' is not registered", type_name::<C>()),
        }
    }

    /// Get component info by ID.
    #[inline]
    pub fn info(&self, id: Id) -> Option<&Info> {
        self.infos.get(id.index())
    }

    /// Iterate the metadata of every registered component in id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Info> {
        self.infos.iter()
    }

    /// Get the pool storing values of `C`.
    ///
    /// # Panics
    /// - If `C` was never registered.
    pub fn pool<C: Component>(&self) -> &Pool<C> {
        let id = self.id::<C>();
        match self.pools[id.index()].as_any().downcast_ref::<Pool<C>>() {
            Some(pool) => pool,
            None => unreachable!("pool {:?} does not store '{}'", id, type_name::<C>()),
        }
    }

    /// Get the pool storing values of `C` mutably.
    ///
    /// # Panics
    /// - If `C` was never registered.
    pub fn pool_mut<C: Component>(&mut self) -> &mut Pool<C> {
        let id = self.id::<C>();
        match self.pools[id.index()].as_any_mut().downcast_mut::<Pool<C>>() {
            Some(pool) => pool,
            None => unreachable!("pool {:?} does not store '{}'", id, type_name::<C>()),
        }
    }

    /// Get a type-erased pool by component id.
    #[inline]
    pub fn erased_pool(&self, id: Id) -> Option<&dyn ErasedPool> {
        self.pools.get(id.index()).map(|pool| pool.as_ref())
    }

    /// The maximum number of component types this directory accepts.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Get the number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Check if no component types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use harrax_macros::Component;

    use super::*;

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Health(u32);

    #[test]
    fn component_registration() {
        // Given
        let mut directory = Directory::new(64);

        // When
        let pos_id = directory.register::<Position>().unwrap();
        let vel_id = directory.register::<Velocity>().unwrap();

        // Then
        assert_ne!(pos_id, vel_id);
        assert_eq!(pos_id, Id::new(0));
        assert_eq!(vel_id, Id::new(1));
        assert_eq!(directory.len(), 2);

        // Then - Registering the same type again should result in the same id
        assert_eq!(directory.register::<Position>().unwrap(), pos_id);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn component_id_retrieval() {
        // Given
        let mut directory = Directory::new(64);
        let health_id = directory.register::<Health>().unwrap();

        // When
        let retrieved = directory.try_id::<Health>();

        // Then
        assert_eq!(retrieved, Some(health_id));
        assert_eq!(directory.id::<Health>(), health_id);

        // Then - Retrieving a non-registered component
        assert!(directory.try_id::<Position>().is_none());
    }

    #[test]
    fn component_info_retrieval() {
        // Given
        let mut directory = Directory::new(64);
        let health_id = directory.register::<Health>().unwrap();

        // When
        let info = directory.info(health_id).unwrap();

        // Then
        assert_eq!(info.id(), health_id);
        assert!(info.name().ends_with("Health"));
        assert!(directory.info(Id::new(5)).is_none());
    }

    #[test]
    fn registration_refused_past_limit() {
        // Given
        let mut directory = Directory::new(2);
        directory.register::<Position>().unwrap();
        directory.register::<Velocity>().unwrap();

        // When
        let result = directory.register::<Health>();

        // Then
        let error = result.unwrap_err();
        assert_eq!(error.kind(), Kind::Component);
        assert_eq!(error.limit(), 2);
        assert!(error.name().ends_with("Health"));
        assert!(directory.try_id::<Health>().is_none());
        assert_eq!(directory.len(), 2);

        // Then - Already registered types still resolve when full
        assert!(directory.register::<Position>().is_ok());
    }

    #[test]
    fn pools_are_exclusive_per_type() {
        // Given
        let mut directory = Directory::new(64);
        directory.register::<Position>().unwrap();
        directory.register::<Velocity>().unwrap();

        // When
        directory
            .pool_mut::<Position>()
            .insert(0, Position { x: 1.0, y: 2.0 });

        // Then
        assert_eq!(
            directory.pool::<Position>().get(0),
            Some(&Position { x: 1.0, y: 2.0 })
        );
        assert_eq!(directory.pool::<Velocity>().slot_count(), 0);
        assert_eq!(
            directory
                .erased_pool(directory.id::<Position>())
                .unwrap()
                .slot_count(),
            1
        );
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn unregistered_id_panics() {
        let directory = Directory::new(64);
        directory.id::<Position>();
    }
}
