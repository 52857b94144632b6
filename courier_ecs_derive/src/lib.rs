mod component;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `Component` and `ComponentTypeInfo` for a type.
///
/// Accepted attributes:
/// - `#[component(allow_multiple)]` lets an entity hold several instances of the type.
/// - `#[component(priority = 50)]` sets the update-ordering priority (lower runs first).
/// - `#[component(hooks)]` skips the empty `Component` impl so lifecycle hooks can be written by hand.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match component::impl_component(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
