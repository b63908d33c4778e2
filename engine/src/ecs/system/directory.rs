use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
};

use dashmap::DashMap;
use log::{debug, warn};

use crate::ecs::{
    component::{self, IntoSpec},
    entity,
    error::{CapacityError, Kind},
    query::Mask,
    system::{Handle, Id, Info, System},
};

/// A created system and its cached entity list.
struct Instance {
    /// The instance's system type.
    id: Id,

    /// Entities matching the type's mask as of the last refresh.
    entities: Vec<entity::Entity>,

    /// The system itself. `None` while lent out by [`Directory::lend`].
    system: Option<Box<dyn Any>>,
}

/// The system directory. Records each registered system type's requirement and owns every
/// created system instance together with its cached entity list.
///
/// Cached lists are only recomputed by [`refresh`](Self::refresh); component pools do not notify
/// systems when an entity gains a component.
pub struct Directory {
    /// Map from TypeId to system Id.
    type_map: DashMap<TypeId, Id>,

    /// Registered system type metadata, indexed by [`Id`].
    infos: Vec<Info>,

    /// All created instances, indexed by [`Handle`].
    instances: Vec<Instance>,

    /// Maximum number of system types this directory accepts.
    limit: usize,
}

impl Directory {
    /// Create a new, empty directory accepting at most `limit` system types.
    #[inline]
    pub fn new(limit: usize) -> Self {
        Self {
            type_map: DashMap::new(),
            infos: Vec::new(),
            instances: Vec::new(),
            limit,
        }
    }

    /// Register a system type, resolving its required components to a mask.
    ///
    /// Registering a type twice returns the existing id. If the directory is full, the
    /// registration is refused with a [`CapacityError`] and a warning is logged.
    ///
    /// # Panics
    /// - If a required component is not registered in `components`.
    pub fn register<S: System>(
        &mut self,
        components: &component::Directory,
    ) -> Result<Id, CapacityError> {
        if let Some(id) = self.try_id::<S>() {
            return Ok(id);
        }

        let name = type_name::<S>();
        if self.infos.len() >= self.limit {
            warn!(
                "Failed to register system '{}'. Increase the limit (currently {})!",
                name, self.limit
            );
            return Err(CapacityError::new(Kind::System, name, self.limit));
        }

        let spec = S::Required::into_spec(components);
        let mask = Mask::from_spec(&spec, components.limit());
        let id = Id(self.infos.len() as u32);
        self.infos.push(Info::new(id, name, spec, mask));
        self.type_map.insert(TypeId::of::<S>(), id);
        debug!("Registered system '{}' as {:?}", name, id);

        Ok(id)
    }

    /// Get the system ID for a provided type `S`, if registered.
    #[inline]
    pub fn try_id<S: System>(&self) -> Option<Id> {
        self.type_map
            .get(&TypeId::of::<S>())
            .map(|entry| *entry.value())
    }

    /// Get the system ID for a provided type `S`.
    ///
    /// # Panics
    /// - If `S` was never registered.
    #[inline]
    pub fn id<S: System>(&self) -> Id {
        match self.try_id::<S>() {
            Some(id) => id,
            None => panic!("system '{}' is not registered", type_name::<S>()),
        }
    }

    /// Get system type info by ID.
    #[inline]
    pub fn info(&self, id: Id) -> Option<&Info> {
        self.infos.get(id.index())
    }

    /// Store a new instance of `S` and populate its entity list from `table`.
    ///
    /// # Panics
    /// - If `S` was never registered.
    pub fn create<S: System>(&mut self, system: S, table: &entity::Table) -> Handle<S> {
        let id = self.id::<S>();
        let entities = table.query(self.infos[id.index()].mask());
        let handle = Handle::new(self.instances.len());
        self.instances.push(Instance {
            id,
            entities,
            system: Some(Box::new(system)),
        });
        handle
    }

    /// Recompute every instance's entity list from `table`.
    ///
    /// Instances whose types share an identical mask share one scan. Returns the number of scans
    /// performed.
    pub fn refresh(&mut self, table: &entity::Table) -> usize {
        let mut results: HashMap<&Mask, Vec<entity::Entity>> = HashMap::new();
        for instance in self.instances.iter_mut() {
            let mask = self.infos[instance.id.index()].mask();
            let entities = results.entry(mask).or_insert_with(|| table.query(mask));
            instance.entities.clone_from(entities);
        }
        results.len()
    }

    /// Get the cached entity list of an instance.
    #[inline]
    pub fn entities<S: System>(&self, handle: Handle<S>) -> &[entity::Entity] {
        &self.instance(handle).entities
    }

    /// Get a system instance.
    ///
    /// # Panics
    /// - If the instance is currently lent out.
    pub fn get<S: System>(&self, handle: Handle<S>) -> &S {
        match self
            .instance(handle)
            .system
            .as_ref()
            .and_then(|system| system.downcast_ref::<S>())
        {
            Some(system) => system,
            None => panic!("system '{}' is currently running", type_name::<S>()),
        }
    }

    /// Get a system instance mutably.
    ///
    /// # Panics
    /// - If the instance is currently lent out.
    pub fn get_mut<S: System>(&mut self, handle: Handle<S>) -> &mut S {
        match self
            .instance_mut(handle)
            .system
            .as_mut()
            .and_then(|system| system.downcast_mut::<S>())
        {
            Some(system) => system,
            None => panic!("system '{}' is currently running", type_name::<S>()),
        }
    }

    /// Take an instance out of the directory along with a copy of its entity list. The instance
    /// must be handed back with [`restore`](Self::restore).
    ///
    /// # Panics
    /// - If the instance is already lent out.
    pub fn lend<S: System>(&mut self, handle: Handle<S>) -> (Box<S>, Vec<entity::Entity>) {
        let instance = self.instance_mut(handle);
        let system = match instance.system.take().map(|system| system.downcast::<S>()) {
            Some(Ok(system)) => system,
            _ => panic!("system '{}' is already running", type_name::<S>()),
        };
        (system, instance.entities.clone())
    }

    /// Return an instance taken with [`lend`](Self::lend).
    pub fn restore<S: System>(&mut self, handle: Handle<S>, system: Box<S>) {
        self.instance_mut(handle).system = Some(system);
    }

    /// The maximum number of system types this directory accepts.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Get the number of registered system types.
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Check if no system types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Get the number of created system instances.
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn instance<S: System>(&self, handle: Handle<S>) -> &Instance {
        let instance = &self.instances[handle.index()];
        assert_eq!(
            instance.id,
            self.id::<S>(),
            "handle does not refer to a '{}' instance",
            type_name::<S>()
        );
        instance
    }

    fn instance_mut<S: System>(&mut self, handle: Handle<S>) -> &mut Instance {
        let id = self.id::<S>();
        let instance = &mut self.instances[handle.index()];
        assert_eq!(
            instance.id,
            id,
            "handle does not refer to a '{}' instance",
            type_name::<S>()
        );
        instance
    }
}
