//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::FieldAttrs;

/// How a field participates in binding, decided from its written type and
/// the `nested` marker.
enum Shape {
    Scalar,
    Optional,
    Sequence,
    BoxedSequence,
    Nested,
    OwnedNested,
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    if let Type::Path(type_path) = ty {
        type_path.path.segments.last()
    } else {
        None
    }
}

/// First type argument of a generic path segment, e.g. `T` in `Vec<T>`.
fn inner_type(segment: &syn::PathSegment) -> Option<&Type> {
    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        for arg in &args.args {
            if let syn::GenericArgument::Type(inner) = arg {
                return Some(inner);
            }
        }
    }
    None
}

fn is_named(ty: &Type, name: &str) -> bool {
    last_segment(ty).map(|seg| seg.ident == name).unwrap_or(false)
}

fn inner_is_named(ty: &Type, name: &str) -> bool {
    last_segment(ty)
        .and_then(inner_type)
        .map(|inner| is_named(inner, name))
        .unwrap_or(false)
}

fn field_shape(ty: &Type, nested: bool) -> Shape {
    if nested {
        if is_named(ty, "Option") && inner_is_named(ty, "Box") {
            Shape::OwnedNested
        } else {
            Shape::Nested
        }
    } else if is_named(ty, "Vec") {
        if inner_is_named(ty, "Box") {
            Shape::BoxedSequence
        } else {
            Shape::Sequence
        }
    } else if is_named(ty, "Option") {
        Shape::Optional
    } else {
        Shape::Scalar
    }
}

/// `EnvBind` derive macro
///
/// Implements the `envbind::EnvBind` trait: the generated `bind` walks the
/// struct's fields in declaration order, building each field's metadata from
/// its `#[env(...)]` annotations and dispatching on the field's type shape
/// (scalar, `Option`, `Vec`, nested struct, owned `Option<Box<_>>`).
///
/// # Supported Attributes
///
/// - `#[env(key = "NAME[,option...]")]`: environment variable and options
/// - `#[env(default = "literal")]`: fallback literal
/// - `#[env(expand = "true")]`: shell-style `${VAR}` substitution
/// - `#[env(separator = ";")]`: separator for `Vec` fields
/// - `#[env(nested)]`: sub-structure field
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvBind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvBind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let field_binds = fields.iter().map(|field| {
        let field_name = field.ident.as_ref().unwrap();
        let attrs = FieldAttrs::from_field(field);

        let name = field_name.to_string();
        let key = attrs.key.unwrap_or_default();
        let default = attrs.default.unwrap_or_default();
        let expand = attrs.expand.unwrap_or_default();
        let separator = attrs.separator.unwrap_or_default();

        let meta = quote! {
            &::envbind::FieldMeta {
                name: #name,
                key: #key,
                default: #default,
                expand: #expand,
                separator: #separator,
            }
        };

        match field_shape(&field.ty, attrs.nested) {
            Shape::Scalar => quote! {
                binder.bind_value(&mut self.#field_name, #meta)?;
            },
            Shape::Optional => quote! {
                binder.bind_optional(&mut self.#field_name, #meta)?;
            },
            Shape::Sequence => quote! {
                binder.bind_sequence(&mut self.#field_name, #meta)?;
            },
            Shape::BoxedSequence => quote! {
                binder.bind_boxed_sequence(&mut self.#field_name, #meta)?;
            },
            Shape::Nested => quote! {
                binder.bind_nested(&mut self.#field_name, #meta)?;
            },
            Shape::OwnedNested => quote! {
                binder.bind_owned(&mut self.#field_name, #meta)?;
            },
        }
    });

    let expanded: proc_macro2::TokenStream = quote! {
        impl ::envbind::EnvBind for #struct_name {
            fn bind(
                &mut self,
                binder: &::envbind::Binder,
            ) -> ::std::result::Result<(), ::envbind::Error> {
                #(#field_binds)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
