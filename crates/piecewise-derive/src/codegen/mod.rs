//! Code generation for the `Mutable` derive macro.

mod generic_rep;
mod leaf;
mod product;
mod sum;
mod utils;

use crate::parse::MutableInput;
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use std::collections::HashSet;
use syn::{Data, DeriveInput};

/// Main entry point for code generation.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    if let Data::Union(data) = &input.data {
        return Err(syn::Error::new_spanned(
            data.union_token,
            "Mutable cannot be derived for unions",
        ));
    }

    let parsed = MutableInput::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(input, e.to_string()))?;

    validate(&parsed)?;

    if parsed.leaf {
        return leaf::generate(&parsed);
    }
    if parsed.generic {
        return generic_rep::generate(&parsed);
    }
    match parsed.struct_fields() {
        Some(fields) => product::generate(&parsed, fields),
        None => sum::generate(&parsed),
    }
}

/// Reject option combinations that have no meaning.
fn validate(input: &MutableInput) -> syn::Result<()> {
    if input.leaf && input.generic {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[piecewise(leaf)] and #[piecewise(generic)] cannot be used together. \
             A leaf stores the whole value in one cell; generic derives a cell per field.",
        ));
    }

    if input.ref_name.is_some() && (input.leaf || input.generic) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[piecewise(ref_name)] has no effect with #[piecewise(leaf)] or \
             #[piecewise(generic)], which do not generate a ref type.",
        ));
    }

    if input.by_type {
        if input.is_enum() || input.leaf || input.generic {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[piecewise(by_type)] is only supported on structs using the default strategy.",
            ));
        }
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "#[piecewise(by_type)] is not supported on generic types: \
                 a type parameter could match any field.",
            ));
        }
    }

    if input.leaf || input.generic {
        if let Some(field) = input.all_fields().into_iter().find(|f| f.leaf) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[piecewise(leaf)] on a field requires the default strategy. \
                 Remove it, or drop #[piecewise(leaf)] / #[piecewise(generic)] from the type.",
            ));
        }
    }

    if input.is_enum() && !input.leaf && !input.generic {
        validate_path_constructors(input)?;
    }

    Ok(())
}

/// Variant path constructors share the enum ref's inherent namespace.
fn validate_path_constructors(input: &MutableInput) -> syn::Result<()> {
    let mut seen = HashSet::new();
    for variant in input.variants() {
        for (index, field) in variant.fields.iter().enumerate() {
            let ctor = sum::path_constructor(&variant.ident.to_string(), &field.name(index));
            let span = field.ident.as_ref().unwrap_or(&variant.ident);
            if sum::REF_METHODS.contains(&ctor.as_str()) {
                return Err(syn::Error::new_spanned(
                    span,
                    format!(
                        "path constructor `{}` collides with a generated method of {}. \
                         Rename the variant or the field, or use #[piecewise(generic)].",
                        ctor,
                        input.ref_ident()
                    ),
                ));
            }
            if !seen.insert(ctor.clone()) {
                return Err(syn::Error::new_spanned(
                    span,
                    format!(
                        "path constructor `{}` is generated for two different fields. \
                         Rename the variant or the field, or use #[piecewise(generic)].",
                        ctor
                    ),
                ));
            }
        }
    }
    Ok(())
}
