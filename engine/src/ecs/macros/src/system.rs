use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Token, Type, parse_macro_input, punctuated::Punctuated};

pub fn derive_system(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let struct_name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // Collect every type listed across all `#[requires(...)]` attributes.
    let mut required: Vec<Type> = Vec::new();
    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("requires")) {
        match attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated) {
            Ok(types) => required.extend(types),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    TokenStream::from(quote! {
        impl #impl_generics ::harrax_engine::ecs::System for #struct_name #ty_generics #where_clause {
            type Required = ( #( #required, )* );
        }
    })
}
