use std::any::Any;

use crate::ecs::component::Component;

/// Growable storage for a single component type, indexed directly by entity index.
///
/// The pool starts empty and grows by doubling its slot count the first time an index beyond the
/// current capacity is touched. Growth preserves every stored value at its original index. The
/// pool never shrinks and slots are never freed individually.
///
/// Slots which have never been written hold `None`; whether an entity owns the component is
/// decided by its membership mask, the pool only stores values.
#[derive(Debug, Clone)]
pub struct Pool<C: Component> {
    slots: Vec<Option<C>>,
}

impl<C: Component> Default for Pool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> Pool<C> {
    /// Construct an empty pool.
    #[inline]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// The number of addressable slots. Always zero or a power of two.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Get a value at the given index, if one has been written.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Get a mutable value at the given index, if one has been written.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Get the slot at the given index, growing the pool first if the index is out of range.
    pub fn slot_mut(&mut self, index: usize) -> &mut Option<C> {
        self.ensure_slot(index);
        &mut self.slots[index]
    }

    /// Write a value into the slot at the given index, growing the pool as needed.
    #[inline]
    pub fn insert(&mut self, index: usize, value: C) {
        *self.slot_mut(index) = Some(value);
    }

    /// Double the slot count (starting from one) until `index` is addressable.
    fn ensure_slot(&mut self, index: usize) {
        let mut slot_count = self.slots.len();
        if index < slot_count {
            return;
        }
        while index >= slot_count {
            slot_count = if slot_count == 0 { 1 } else { slot_count * 2 };
        }
        self.slots.reserve_exact(slot_count - self.slots.len());
        self.slots.resize(slot_count, None);
    }
}

/// A pool with its component type erased, so pools of different types can share one directory.
pub trait ErasedPool: Any {
    /// The number of addressable slots.
    fn slot_count(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedPool for Pool<C> {
    #[inline]
    fn slot_count(&self) -> usize {
        Pool::slot_count(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use harrax_macros::Component;

    use super::*;

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Health(u32);

    #[derive(Component, Clone, Copy, Debug, PartialEq)]
    struct Mana(u32);

    #[test]
    fn new_pool_is_empty() {
        // Given
        let pool = Pool::<Health>::new();

        // Then
        assert_eq!(pool.slot_count(), 0);
        assert_eq!(pool.get(0), None);
    }

    #[test]
    fn grows_by_doubling() {
        // Given
        let mut pool = Pool::<Health>::new();

        // When
        pool.insert(0, Health(1));

        // Then
        assert_eq!(pool.slot_count(), 1);

        // When
        pool.insert(1, Health(2));

        // Then
        assert_eq!(pool.slot_count(), 2);

        // When - Jump well past capacity
        pool.insert(5, Health(6));

        // Then
        assert_eq!(pool.slot_count(), 8);
    }

    #[test]
    fn growth_preserves_values() {
        // Given
        let mut pool = Pool::<Health>::new();
        for index in 0..10 {
            pool.insert(index, Health(index as u32 * 10));
        }

        // When
        pool.insert(1000, Health(7));

        // Then
        assert_eq!(pool.slot_count(), 1024);
        for index in 0..10 {
            assert_eq!(pool.get(index), Some(&Health(index as u32 * 10)));
        }
        assert_eq!(pool.get(1000), Some(&Health(7)));
        assert_eq!(pool.get(500), None);
    }

    #[test]
    fn slot_mut_grows_and_allows_in_place_edits() {
        // Given
        let mut pool = Pool::<Health>::new();

        // When
        let slot = pool.slot_mut(3);

        // Then
        assert!(slot.is_none());
        assert_eq!(pool.slot_count(), 4);

        // When
        pool.insert(3, Health(1));
        pool.get_mut(3).unwrap().0 += 41;

        // Then
        assert_eq!(pool.get(3), Some(&Health(42)));
    }

    #[test]
    fn erased_pool_downcasts_to_its_type() {
        // Given
        let mut pool: Box<dyn ErasedPool> = Box::new(Pool::<Health>::new());

        // When
        pool.as_any_mut()
            .downcast_mut::<Pool<Health>>()
            .unwrap()
            .insert(2, Health(3));

        // Then
        assert_eq!(pool.slot_count(), 4);
        assert!(pool.as_any().downcast_ref::<Pool<Mana>>().is_none());
    }
}
