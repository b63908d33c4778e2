//! Entity management for the ECS (Entity Component System).
//!
//! Entities are lightweight handles that tie components together. They carry no data of their
//! own beyond a membership [`Mask`] recording which component types they currently own.
//!
//! # Lifecycle
//!
//! Ids are assigned densely in strictly increasing order starting at zero and are never reused.
//! An entity is either not yet created or alive; there is no destroyed state, so an [`Entity`]
//! handle never goes stale and needs no generation counter.
//!
//! ```rust,ignore
//! let mut table = Table::new(64);
//! let a = table.create(); // Entity(0)
//! let b = table.create(); // Entity(1)
//! ```

use std::fmt;

use crate::ecs::{component, query::Mask};

/// An entity in the ECS, identified by its creation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Construct an entity handle from a raw id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id of this entity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Entity {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A created entity and the components it owns.
#[derive(Debug, Clone)]
struct Entry {
    entity: Entity,
    mask: Mask,
}

/// The table of every created entity, in creation order.
#[derive(Debug, Clone)]
pub struct Table {
    entries: Vec<Entry>,

    /// The mask width given to every new entity.
    width: usize,
}

impl Table {
    /// Construct a new empty table whose entity masks hold `width` component ids.
    #[inline]
    pub const fn new(width: usize) -> Self {
        Self {
            entries: Vec::new(),
            width,
        }
    }

    /// Create a new entity with no components.
    pub fn create(&mut self) -> Entity {
        let entity = Entity(self.entries.len() as u32);
        self.entries.push(Entry {
            entity,
            mask: Mask::new(self.width),
        });
        entity
    }

    /// Determine if the entity has been created by this table.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        entity.index() < self.entries.len()
    }

    /// Get the membership mask of an entity.
    ///
    /// # Panics
    /// - If the entity was never created.
    #[inline]
    pub fn mask(&self, entity: Entity) -> &Mask {
        &self.entry(entity).mask
    }

    /// Determine if the entity owns the component.
    ///
    /// # Panics
    /// - If the entity was never created.
    #[inline]
    pub fn has(&self, entity: Entity, id: component::Id) -> bool {
        self.entry(entity).mask.contains(id)
    }

    /// Record that the entity owns the component. Returns `true` if the bit was previously clear.
    ///
    /// # Panics
    /// - If the entity was never created.
    pub fn insert(&mut self, entity: Entity, id: component::Id) -> bool {
        match self.entries.get_mut(entity.index()) {
            Some(entry) => entry.mask.insert(id),
            None => panic!("attempted to access an entity that was never created: {entity}"),
        }
    }

    /// Iterate the entities whose mask is a superset of `required`, in creation order.
    ///
    /// An empty `required` mask matches every entity.
    pub fn matching<'a>(&'a self, required: &'a Mask) -> impl Iterator<Item = Entity> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.mask.contains_all(required))
            .map(|entry| entry.entity)
    }

    /// Collect the entities whose mask is a superset of `required`, in creation order.
    #[inline]
    pub fn query(&self, required: &Mask) -> Vec<Entity> {
        self.matching(required).collect()
    }

    /// Iterate every created entity in creation order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().map(|entry| entry.entity)
    }

    /// The mask width of every entity in the table.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of created entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entities have been created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, entity: Entity) -> &Entry {
        match self.entries.get(entity.index()) {
            Some(entry) => entry,
            None => panic!("attempted to access an entity that was never created: {entity}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Id, Spec};

    #[test]
    fn ids_strictly_increase_from_zero() {
        // Given
        let mut table = Table::new(64);

        // When
        let entities: Vec<_> = (0..200).map(|_| table.create()).collect();

        // Then - No dupes, dense, in order
        for (index, entity) in entities.iter().enumerate() {
            assert_eq!(entity.index(), index);
        }
        assert!(entities.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(table.len(), 200);
    }

    #[test]
    fn new_entity_has_no_components() {
        // Given
        let mut table = Table::new(64);

        // When
        let entity = table.create();

        // Then
        assert!(table.mask(entity).is_empty());
        assert!(!table.has(entity, Id::new(0)));
        assert_eq!(table.mask(entity).width(), 64);
    }

    #[test]
    fn insert_sets_bit_once() {
        // Given
        let mut table = Table::new(64);
        let entity = table.create();

        // When
        let first = table.insert(entity, Id::new(4));
        let second = table.insert(entity, Id::new(4));

        // Then
        assert!(first);
        assert!(!second);
        assert!(table.has(entity, Id::new(4)));
    }

    #[test]
    fn query_returns_supersets_in_creation_order() {
        // Given
        let mut table = Table::new(64);
        let e0 = table.create();
        let e1 = table.create();
        let e2 = table.create();
        let e3 = table.create();
        table.insert(e0, Id::new(0));
        table.insert(e1, Id::new(1));
        table.insert(e2, Id::new(0));
        table.insert(e2, Id::new(1));
        table.insert(e3, Id::new(1));
        table.insert(e3, Id::new(0));
        table.insert(e3, Id::new(2));

        // When
        let required = Mask::from_spec(&Spec::new(vec![Id::new(1), Id::new(0)]), 64);

        // Then
        assert_eq!(table.query(&required), vec![e2, e3]);
    }

    #[test]
    fn empty_query_matches_every_entity() {
        // Given
        let mut table = Table::new(64);
        let e0 = table.create();
        let e1 = table.create();
        table.insert(e1, Id::new(9));

        // Then
        assert_eq!(table.query(&Mask::new(64)), vec![e0, e1]);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![e0, e1]);
    }

    #[test]
    #[should_panic(expected = "never created")]
    fn unknown_entity_panics() {
        let table = Table::new(64);
        table.has(Entity::new(3), Id::new(0));
    }
}
