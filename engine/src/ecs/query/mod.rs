//! Membership queries over the entity table.
//!
//! A query starts from a set of required component types, resolves it once to a [`Mask`], then
//! scans the entity table in creation order yielding every entity whose own mask is a superset of
//! the requirement. There is no index beyond the bitmask comparison: at the scale the demo runs
//! (hundreds of entities) a linear scan is cheap and trivially correct.
//!
//! # Pull and push styles
//!
//! ```rust,ignore
//! // Pull: collect the matching entity ids.
//! let moving = registry.query::<(Transform, Physics)>();
//!
//! // Push: visit each match with references to the requested components.
//! registry.view::<(&Transform, &Sprite)>(|entity, (transform, sprite)| {
//!     submit(entity, transform, sprite);
//! });
//! ```
//!
//! The push style is driven by [`Fetch`], implemented for `&C` and tuples of fetches.

mod mask;

pub use mask::Mask;

use crate::{
    all_tuples,
    ecs::{
        component::{self, Component, Directory, IntoSpec},
        entity,
    },
};

/// Types which can be fetched for a matching entity during a push-style view.
///
/// # Implementations
///
/// - **`&C`**: A shared reference to the entity's `C` component
/// - **Tuples**: Tuples of `Fetch` types (up to 26 elements)
pub trait Fetch {
    /// The value handed to the view callback, with the registry lifetime applied.
    type Value<'w>;

    /// The components an entity must own for this fetch to succeed.
    fn spec(components: &Directory) -> component::Spec;

    /// Fetch the value for one entity.
    ///
    /// # Panics
    /// - If the entity does not own one of the fetched components. Callers only fetch entities
    ///   that matched [`Fetch::spec`].
    fn fetch<'w>(components: &'w Directory, entity: entity::Entity) -> Self::Value<'w>;
}

impl<C: Component> Fetch for &C {
    type Value<'w> = &'w C;

    #[inline]
    fn spec(components: &Directory) -> component::Spec {
        C::into_spec(components)
    }

    #[inline]
    fn fetch<'w>(components: &'w Directory, entity: entity::Entity) -> Self::Value<'w> {
        match components.pool::<C>().get(entity.index()) {
            Some(value) => value,
            None => panic!(
                "entity {:?} has no '{}' component",
                entity,
                std::any::type_name::<C>()
            ),
        }
    }
}

/// [`Fetch`] implementation for tuples of other [`Fetch`] types.
macro_rules! tuple_fetch {
    ($($name: ident),*) => {
        impl<$($name: Fetch),*> Fetch for ($($name,)*) {
            type Value<'w> = ($($name::Value<'w>,)*);

            fn spec(components: &Directory) -> component::Spec {
                let mut spec = component::Spec::EMPTY;
                $(
                    spec = spec.union(&<$name>::spec(components));
                )*
                spec
            }

            #[inline]
            fn fetch<'w>(components: &'w Directory, entity: entity::Entity) -> Self::Value<'w> {
                ($(<$name>::fetch(components, entity),)*)
            }
        }
    }
}

// Implement the tuple Fetch for all tuples up to 26 elements.
all_tuples!(tuple_fetch);
