use fixedbitset::FixedBitSet;

use crate::ecs::component;

/// A fixed-width membership bit vector. Bit N set means component ID N is present.
///
/// Every entity carries one mask recording the components it owns, and every system type carries
/// one mask for the components it requires. An entity matches a requirement when its mask is a
/// superset of the required mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    /// The bitset for tracking components.
    bits: FixedBitSet,
}

impl Mask {
    /// Construct an all-zero mask able to hold component ids `0..width`.
    #[inline]
    pub fn new(width: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(width),
        }
    }

    /// Creates a new mask with the bit of every component in `spec` set.
    ///
    /// # Panics
    /// - If an id in `spec` does not fit in `width`.
    pub fn from_spec(spec: &component::Spec, width: usize) -> Self {
        let mut mask = Self::new(width);
        for id in spec.ids() {
            mask.insert(*id);
        }
        mask
    }

    /// The number of component ids this mask can hold.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Set the bit for the given component. Returns `true` if the bit was previously clear.
    ///
    /// # Panics
    /// - If the id does not fit in the mask width.
    #[inline]
    pub fn insert(&mut self, id: component::Id) -> bool {
        assert!(
            id.index() < self.width(),
            "component {:?} does not fit in a mask of width {}",
            id,
            self.width()
        );
        !self.bits.put(id.index())
    }

    /// Check whether the bit for the given component is set.
    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        self.bits.contains(id.index())
    }

    /// Check if this mask contains every bit set in `required`.
    #[inline]
    pub fn contains_all(&self, required: &Mask) -> bool {
        self.bits.is_superset(&required.bits)
    }

    /// Check if this mask is empty (no components).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of components in this mask.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate the component ids set in this mask, in ascending order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = component::Id> + '_ {
        self.bits.ones().map(component::Id::from)
    }
}
