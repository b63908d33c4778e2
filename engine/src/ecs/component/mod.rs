//! Component management for the ECS.
//!
//! This module provides the infrastructure for registering and storing component types.
//! Components are plain-data values attached to entities; each registered type gets a small,
//! stable [`Id`] and a [`Pool`] holding one value per entity index.
//!
//! ## Architecture
//!
//! - [`Component`]: The trait that all component types must implement
//! - [`Id`]: A unique identifier for each registered component type
//! - [`Directory`]: Registration, id lookup and exclusive ownership of every pool
//! - [`Pool`]: Growable, entity-indexed storage for a single component type
//! - [`Spec`]: A sorted set of component ids
//!
//! ## Usage
//!
//! ```ignore
//! use harrax_engine::ecs::component::{Component, Directory};
//!
//! #[derive(Component, Clone, Copy)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut directory = Directory::new(64);
//! let pos_id = directory.register::<Position>()?;
//! ```

mod directory;
mod pool;
mod spec;

pub use directory::Directory;
pub use pool::{ErasedPool, Pool};
pub use spec::{IntoSpec, Spec};

/// A component identifier. Assigned in registration order starting at zero, and always below the
/// directory's configured limit so it can index a membership mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component in the ECS.
///
/// Components must be plain, flat data which can be relocated by a bitwise copy, so `Copy` is a
/// supertrait. Types with custom copy or move semantics are rejected at compile time.
pub trait Component: 'static + Sized + Copy {}

/// Metadata about a registered component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    /// The component's id.
    id: Id,

    /// The type's name, used for diagnostics.
    name: &'static str,
}

impl Info {
    /// Construct Info for component type `C`.
    #[inline]
    pub(crate) fn new<C: Component>(id: Id) -> Self {
        Self {
            id,
            name: std::any::type_name::<C>(),
        }
    }

    /// Get the component id.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}
