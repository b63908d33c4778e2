mod component;
mod system;

use proc_macro::TokenStream;

#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}

/// Derive `System` for a struct. The components matched entities must hold are listed in a
/// `#[requires(...)]` attribute, e.g. `#[requires(Transform, Physics)]`. Without the attribute the
/// system matches every entity.
#[proc_macro_derive(System, attributes(requires))]
pub fn derive_system(item: TokenStream) -> TokenStream {
    system::derive_system(item)
}
