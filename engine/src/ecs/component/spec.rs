use crate::{
    all_tuples,
    ecs::component::{self, Component, Directory},
};

/// A set of component ids, such as the components a system requires of the entities it runs on.
///
/// Stored sorted and deduplicated: `(A, B)`, `(B, A)` and `(A, B, A)` all resolve to the same
/// spec and hash alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Spec(Vec<component::Id>);

impl Spec {
    /// The spec of no components. Matches every entity.
    pub const EMPTY: Self = Spec(Vec::new());

    /// Construct a spec from component ids in any order, with or without repeats.
    pub fn new(ids: impl Into<Vec<component::Id>>) -> Self {
        let mut ids = ids.into();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    /// The component ids, ascending.
    #[inline]
    pub fn ids(&self) -> &[component::Id] {
        &self.0
    }

    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    /// Determine if every id of `other` is also in this spec.
    #[inline]
    pub fn contains_all(&self, other: &Spec) -> bool {
        other.0.iter().all(|id| self.contains(*id))
    }

    /// The spec holding the ids of both specs.
    pub fn union(&self, other: &Spec) -> Self {
        self.0.iter().chain(&other.0).copied().collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<component::Id>> for Spec {
    #[inline]
    fn from(value: Vec<component::Id>) -> Self {
        Spec::new(value)
    }
}

impl FromIterator<component::Id> for Spec {
    fn from_iter<I: IntoIterator<Item = component::Id>>(iter: I) -> Self {
        Spec::new(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Types naming a set of component types: a single component, `()` or a tuple of them.
///
/// Every component named must already be registered with the directory; resolving an
/// unregistered component panics.
pub trait IntoSpec {
    /// Push the id of every named component onto `ids`.
    fn collect_ids(directory: &Directory, ids: &mut Vec<component::Id>);

    /// Resolve the named components to a [`Spec`].
    fn into_spec(directory: &Directory) -> Spec {
        let mut ids = Vec::new();
        Self::collect_ids(directory, &mut ids);
        Spec::new(ids)
    }
}

impl IntoSpec for () {
    #[inline]
    fn collect_ids(_directory: &Directory, _ids: &mut Vec<component::Id>) {}
}

impl<C: Component> IntoSpec for C {
    #[inline]
    fn collect_ids(directory: &Directory, ids: &mut Vec<component::Id>) {
        ids.push(directory.id::<C>());
    }
}

macro_rules! tuple_spec {
    ($($name: ident),*) => {
        impl<$($name: IntoSpec),*> IntoSpec for ($($name,)*) {
            #[inline]
            fn collect_ids(directory: &Directory, ids: &mut Vec<component::Id>) {
                $(
                    <$name>::collect_ids(directory, ids);
                )*
            }
        }
    }
}

all_tuples!(tuple_spec);

#[cfg(test)]
mod tests {
    use harrax_macros::Component;
    use std::hash::{BuildHasher, RandomState};

    use super::*;
    use crate::ecs::component::Id;

    #[derive(Component, Clone, Copy)]
    struct Transform;
    #[derive(Component, Clone, Copy)]
    struct Physics;
    #[derive(Component, Clone, Copy)]
    struct Sprite;

    fn directory() -> Directory {
        let mut directory = Directory::new(8);
        directory.register::<Transform>().unwrap();
        directory.register::<Physics>().unwrap();
        directory.register::<Sprite>().unwrap();
        directory
    }

    #[test]
    fn order_and_repeats_do_not_matter() {
        // Given
        let hasher = RandomState::new();

        // When
        let spec1 = Spec::new(vec![Id::new(2), Id::new(0), Id::new(1)]);
        let spec2 = Spec::new(vec![Id::new(1), Id::new(2), Id::new(0), Id::new(2)]);

        // Then
        assert_eq!(spec1, spec2);
        assert_eq!(spec1.ids(), &[Id::new(0), Id::new(1), Id::new(2)]);
        assert_eq!(hasher.hash_one(&spec1), hasher.hash_one(&spec2));
    }

    #[test]
    fn containment() {
        // Given
        let all = Spec::new(vec![Id::new(0), Id::new(1), Id::new(2)]);
        let pair = Spec::new(vec![Id::new(2), Id::new(0)]);
        let other = Spec::new(vec![Id::new(0), Id::new(5)]);

        // Then
        assert!(all.contains_all(&pair));
        assert!(all.contains_all(&Spec::EMPTY));
        assert!(!all.contains_all(&other));
        assert!(!pair.contains(Id::new(1)));
    }

    #[test]
    fn union_is_sorted_and_unique() {
        // Given
        let left = Spec::new(vec![Id::new(3), Id::new(1)]);
        let right = Spec::new(vec![Id::new(1), Id::new(2)]);

        // When
        let union = left.union(&right);

        // Then
        assert_eq!(union.ids(), &[Id::new(1), Id::new(2), Id::new(3)]);
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn tuples_resolve_through_the_directory() {
        // Given
        let directory = directory();

        // When
        let spec1 = <(Sprite, Transform)>::into_spec(&directory);
        let spec2 = <(Transform, Sprite, Transform)>::into_spec(&directory);

        // Then
        assert_eq!(spec1, spec2);
        assert_eq!(
            spec1.ids(),
            &[directory.id::<Transform>(), directory.id::<Sprite>()]
        );
        assert_eq!(Physics::into_spec(&directory).len(), 1);
        assert!(<()>::into_spec(&directory).is_empty());
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn unregistered_component_panics() {
        // Given
        #[derive(Component, Clone, Copy)]
        struct Unknown;
        let directory = directory();

        // When
        let _ = <(Transform, Unknown)>::into_spec(&directory);
    }
}
