use syn::{DeriveInput, Lit, Meta, NestedMeta};
use quote::{format_ident, quote};
use proc_macro2::TokenStream;

#[derive(Default)]
struct ComponentAttributes {
    allow_multiple: bool,
    custom_hooks: bool,
    priority: i32,
}

pub fn impl_component(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let attributes = parse_attributes(ast)?;

    let name_str = name.to_string().to_uppercase();
    let id_name = format_ident!("__COMPONENT_ID_OF_{}", name_str);

    let allow_multiple = attributes.allow_multiple;
    let priority = attributes.priority;

    let hooks = if attributes.custom_hooks {
        quote! {}
    } else {
        quote! {
            impl courier_ecs::components::Component for #name {}
        }
    };

    Ok(quote! {
        courier_ecs::lazy_static! {
            static ref #id_name: courier_ecs::components::ComponentId =
                courier_ecs::components::component_id::get_next(stringify!(#name));
        }

        impl courier_ecs::components::ComponentTypeInfo for #name {
            const ALLOW_MULTIPLE: bool = #allow_multiple;
            const PRIORITY: i32 = #priority;

            #[inline(always)]
            fn component_id() -> courier_ecs::components::ComponentId {
                *#id_name
            }
        }

        #hooks
    })
}

fn parse_attributes(ast: &DeriveInput) -> syn::Result<ComponentAttributes> {
    let mut attributes = ComponentAttributes::default();

    for attr in ast.attrs.iter().filter(|a| a.path.is_ident("component")) {
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            other => return Err(syn::Error::new_spanned(other, "expected #[component(...)]")),
        };

        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("allow_multiple") => {
                    attributes.allow_multiple = true;
                },
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("hooks") => {
                    attributes.custom_hooks = true;
                },
                NestedMeta::Meta(Meta::NameValue(value)) if value.path.is_ident("priority") => {
                    attributes.priority = match &value.lit {
                        Lit::Int(int) => int.base10_parse::<i32>()?,
                        Lit::Str(str) => str
                            .value()
                            .parse::<i32>()
                            .map_err(|e| syn::Error::new_spanned(&value.lit, e))?,
                        other => return Err(syn::Error::new_spanned(other, "priority must be an integer")),
                    };
                },
                other => return Err(syn::Error::new_spanned(other, "unknown component attribute")),
            }
        }
    }

    Ok(attributes)
}
