//! Field storage analysis for code generation.

use crate::parse::FieldInput;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Type;

/// How a field is stored in the generated mutable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Through the field type's own `Mutable` registration.
    Mutable,

    /// In a single `MutCell`, whatever the field type (`#[piecewise(leaf)]`).
    Leaf,
}

impl FieldKind {
    /// Determine the storage of a field.
    pub fn of(field: &FieldInput) -> Self {
        if field.leaf {
            FieldKind::Leaf
        } else {
            FieldKind::Mutable
        }
    }

    /// The type of the field's handle in the generated ref.
    pub fn ref_type(self, ty: &Type) -> TokenStream {
        match self {
            FieldKind::Mutable => quote! { <#ty as ::piecewise::Mutable>::Ref },
            FieldKind::Leaf => quote! { ::piecewise::MutCell<#ty> },
        }
    }

    /// A call to operation `op` (one of the `Mutable` operations) for this
    /// field.
    pub fn op(self, ty: &Type, op: &str, args: TokenStream) -> TokenStream {
        let op = format_ident!("{}", op);
        match self {
            FieldKind::Mutable => quote! { <#ty as ::piecewise::Mutable>::#op(#args) },
            FieldKind::Leaf => quote! { ::piecewise::leaf::#op::<#ty>(#args) },
        }
    }

    /// The where-clause predicate the field needs in generic containers.
    pub fn bound(self, ty: &Type) -> syn::WherePredicate {
        match self {
            FieldKind::Mutable => syn::parse_quote! { #ty: ::piecewise::Mutable },
            FieldKind::Leaf => syn::parse_quote! { #ty: ::std::clone::Clone },
        }
    }
}
