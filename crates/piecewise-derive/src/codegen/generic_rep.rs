//! `Generic` representation for `#[piecewise(generic)]`.
//!
//! Fields become `Labeled<Field<Self, k>, Leaf<T>>` nodes joined by
//! right-nested `Product`s (`Unit` when there are none). Variants become
//! `Labeled<Variant<Self, v>, ..>` nodes joined by right-nested `Sum`s
//! (`Void` when there are none). Field indices `k` count across all variants
//! in declaration order, matching `Generic::FIELDS`.

use super::utils::{bindings, members, product_type, product_value, sum_injection, sum_type};
use super::utils::{index_lit, with_field_bounds};
use crate::parse::{FieldInput, MutableInput};
use darling::ast;
use proc_macro2::TokenStream;
use quote::quote;

/// Representation pieces for one list of fields.
struct FieldsRep {
    ty: TokenStream,
    /// Braced destructuring pattern binding every field.
    destructure: TokenStream,
    /// Representation value built from the destructured bindings.
    value: TokenStream,
    /// Pattern matching the representation value.
    pattern: TokenStream,
    /// Braced constructor rebuilding the fields from the pattern bindings.
    rebuild: TokenStream,
}

fn fields_rep(fields: &ast::Fields<FieldInput>, first_index: usize) -> FieldsRep {
    let members = members(fields);
    let binds = bindings("__g", fields.len());

    let tys = fields.iter().enumerate().map(|(i, f)| {
        let k = index_lit(first_index + i);
        let ty = &f.ty;
        quote! {
            ::piecewise::generic::Labeled<
                ::piecewise::generic::Field<Self, #k>,
                ::piecewise::generic::Leaf<#ty>,
            >
        }
    });
    let values = binds.iter().map(|b| {
        quote!(::piecewise::generic::Labeled::new(::piecewise::generic::Leaf(#b)))
    });

    FieldsRep {
        ty: product_type(tys.collect()),
        destructure: quote!({ #(#members: #binds),* }),
        value: product_value(values.collect()),
        pattern: product_value(binds.iter().map(|b| quote!(#b)).collect()),
        rebuild: quote!({ #(#members: #binds.inner.0),* }),
    }
}

/// Generate `Generic` and the engine-backed `Mutable` impl.
pub fn generate(input: &MutableInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();

    let generics = with_field_bounds(&input.generics, input.all_fields());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut field_names = Vec::new();
    let (rep_ty, into_rep, from_rep, variant_names) = match input.struct_fields() {
        Some(fields) => {
            field_names.extend(fields.iter().enumerate().map(|(i, f)| f.name(i)));
            let rep = fields_rep(fields, 0);
            let (ty, destructure, value) = (rep.ty, rep.destructure, rep.value);
            let (pattern, rebuild) = (rep.pattern, rep.rebuild);
            (
                ty,
                quote! {
                    let Self #destructure = self;
                    #value
                },
                quote! {
                    let #pattern = rep;
                    Self #rebuild
                },
                Vec::new(),
            )
        }
        None => {
            let variants = input.variants();
            let count = variants.len();
            let mut tys = Vec::new();
            let mut into_arms = Vec::new();
            let mut from_arms = Vec::new();

            for (v, variant) in variants.iter().enumerate() {
                let ident = &variant.ident;
                let v_lit = index_lit(v);
                let rep = fields_rep(&variant.fields, field_names.len());
                field_names.extend(variant.fields.iter().enumerate().map(|(i, f)| f.name(i)));

                let inner_ty = rep.ty;
                tys.push(quote! {
                    ::piecewise::generic::Labeled<::piecewise::generic::Variant<Self, #v_lit>, #inner_ty>
                });

                let (destructure, value) = (rep.destructure, rep.value);
                let injected =
                    sum_injection(v, count, quote!(::piecewise::generic::Labeled::new(#value)));
                into_arms.push(quote!(Self::#ident #destructure => #injected));

                let (pattern, rebuild) = (rep.pattern, rep.rebuild);
                let matched = sum_injection(v, count, quote!(__variant));
                from_arms.push(quote! {
                    #matched => {
                        let #pattern = __variant.inner;
                        Self::#ident #rebuild
                    }
                });
            }

            let names = variants.iter().map(|v| v.ident.to_string()).collect();
            (
                sum_type(tys),
                quote!(match self { #(#into_arms,)* }),
                quote!(match rep { #(#from_arms,)* }),
                names,
            )
        }
    };

    let mut mutable_generics = generics.clone();
    mutable_generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote!(#name #ty_generics: ::std::clone::Clone));
    let (_, _, mutable_where) = mutable_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::piecewise::generic::Generic for #name #ty_generics #where_clause {
            type Rep = #rep_ty;

            const TYPE_NAME: &'static str = #type_name;
            const FIELDS: &'static [&'static str] = &[#(#field_names),*];
            const VARIANTS: &'static [&'static str] = &[#(#variant_names),*];

            fn into_rep(self) -> Self::Rep {
                #into_rep
            }

            fn from_rep(rep: Self::Rep) -> Self {
                #from_rep
            }
        }

        impl #impl_generics ::piecewise::Mutable for #name #ty_generics #mutable_where {
            type Ref = ::piecewise::generic::GRef<Self>;

            #[inline]
            fn thaw(&self) -> Self::Ref {
                ::piecewise::generic::thaw(::std::clone::Clone::clone(self))
            }

            #[inline]
            fn thaw_owned(self) -> Self::Ref {
                ::piecewise::generic::thaw(self)
            }

            #[inline]
            fn freeze(__ref: &Self::Ref) -> Self {
                ::piecewise::generic::freeze(__ref)
            }

            #[inline]
            fn freeze_owned(__ref: Self::Ref) -> Self {
                ::piecewise::generic::freeze_owned(__ref)
            }

            #[inline]
            fn copy(__ref: &mut Self::Ref, __value: &Self) {
                ::piecewise::generic::copy(__ref, ::std::clone::Clone::clone(__value))
            }

            #[inline]
            fn copy_owned(__ref: &mut Self::Ref, __value: Self) {
                ::piecewise::generic::copy(__ref, __value)
            }

            #[inline]
            fn move_ref(__dst: &mut Self::Ref, __src: &Self::Ref) {
                ::piecewise::generic::move_ref(__dst, __src)
            }

            #[inline]
            fn clone_ref(__ref: &Self::Ref) -> Self::Ref {
                ::piecewise::generic::clone_ref(__ref)
            }
        }
    })
}
