//! Systems and their cached entity lists.
//!
//! # Overview
//!
//! A system is a behavior unit that declares, once per type, the components an entity must own
//! for the system to operate on it. The declaration is the [`System::Required`] associated type,
//! usually written with the derive macro:
//!
//! ```rust,ignore
//! use harrax_macros::{Component, System};
//!
//! #[derive(Component, Clone, Copy)]
//! struct Transform { position: [f32; 3] }
//!
//! #[derive(Component, Clone, Copy)]
//! struct Physics { velocity: [f32; 3] }
//!
//! #[derive(System)]
//! #[requires(Transform, Physics)]
//! struct PhysicsSystem { gravity: f32 }
//! ```
//!
//! # Lifecycle
//!
//! 1. **Registration** ([`Registry::register_system`](crate::ecs::Registry::register_system)):
//!    the requirement is resolved to a [`Mask`](crate::ecs::query::Mask) once per type. Every
//!    required component must already be registered.
//! 2. **Creation** ([`Registry::create_system`](crate::ecs::Registry::create_system)): the
//!    instance is stored and its entity list is populated by an initial query.
//! 3. **Refresh** ([`Registry::update`](crate::ecs::Registry::update)): every cached list is
//!    recomputed when the registry is dirty. Lists are stale between an attach and the next
//!    refresh.
//! 4. **Run** ([`Registry::run`](crate::ecs::Registry::run)): the instance is lent out together
//!    with its cached list and the registry for one update or render pass.

mod directory;

use std::{fmt, marker::PhantomData};

use crate::ecs::{
    component::{self, IntoSpec},
    query::Mask,
};

pub use directory::Directory;

/// A behavior unit operating on every entity that owns its required components.
pub trait System: 'static {
    /// The components an entity must own to be matched by this system. A component type or a
    /// tuple of them; `()` matches every entity.
    type Required: IntoSpec;
}

/// A system identifier. One per registered system type, assigned in registration order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new system Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this system if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Metadata about a registered system type.
#[derive(Debug, Clone)]
pub struct Info {
    /// The system type's id.
    id: Id,

    /// The type's name, used for diagnostics.
    name: &'static str,

    /// The resolved set of required components.
    spec: component::Spec,

    /// The required components as a membership mask.
    mask: Mask,
}

impl Info {
    #[inline]
    pub(crate) fn new(id: Id, name: &'static str, spec: component::Spec, mask: Mask) -> Self {
        Self {
            id,
            name,
            spec,
            mask,
        }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn spec(&self) -> &component::Spec {
        &self.spec
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// A typed handle to a system instance created in a registry.
pub struct Handle<S> {
    index: usize,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Handle<S> {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Get the index of the instance this handle refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls so handles stay `Copy` whatever `S` is.
impl<S> Clone for Handle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Handle<S> {}

impl<S> PartialEq for Handle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<S> Eq for Handle<S> {}

impl<S> fmt::Debug for Handle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle")
            .field(&std::any::type_name::<S>())
            .field(&self.index)
            .finish()
    }
}
