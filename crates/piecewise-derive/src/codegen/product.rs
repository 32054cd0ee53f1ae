//! Mutable shape generation for structs.
//!
//! Generates a `{Name}Ref` with one handle per field (same field names,
//! order and style as the struct), the `Mutable` / `MutRef` impls, one
//! `FieldPath` per field, and `Decompose`.

use super::utils::{index_lit, members, with_field_bounds};
use crate::field_kind::FieldKind;
use crate::parse::{FieldInput, MutableInput};
use darling::ast::{self, Style};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;

/// Generate the ref struct and trait impls for a struct.
pub fn generate(input: &MutableInput, fields: &ast::Fields<FieldInput>) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let ref_name = input.ref_ident();

    let generics = with_field_bounds(&input.generics, fields.iter());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let members = members(fields);
    let kinds: Vec<FieldKind> = fields.iter().map(FieldKind::of).collect();
    let tys: Vec<&syn::Type> = fields.iter().map(|f| &f.ty).collect();
    let ref_tys: Vec<TokenStream> = kinds
        .iter()
        .zip(&tys)
        .map(|(kind, ty)| kind.ref_type(ty))
        .collect();
    let binds: Vec<_> = (0..fields.len()).map(|i| format_ident!("__field{}", i)).collect();

    let op = |name: &str, args: &dyn Fn(usize) -> TokenStream| -> Vec<TokenStream> {
        (0..fields.len())
            .map(|i| kinds[i].op(tys[i], name, args(i)))
            .collect()
    };

    let thaw = op("thaw", &|i| {
        let m = &members[i];
        quote!(&self.#m)
    });
    let thaw_owned = op("thaw_owned", &|i| {
        let b = &binds[i];
        quote!(#b)
    });
    let freeze = op("freeze", &|i| {
        let m = &members[i];
        quote!(&__ref.#m)
    });
    let freeze_owned = op("freeze_owned", &|i| {
        let b = &binds[i];
        quote!(#b)
    });
    let copy = op("copy", &|i| {
        let m = &members[i];
        quote!(&mut __ref.#m, &__value.#m)
    });
    let copy_owned = op("copy_owned", &|i| {
        let (m, b) = (&members[i], &binds[i]);
        quote!(&mut __ref.#m, #b)
    });
    let move_ref = op("move_ref", &|i| {
        let m = &members[i];
        quote!(&mut __dst.#m, &__src.#m)
    });
    let clone_ref = op("clone_ref", &|i| {
        let m = &members[i];
        quote!(&__ref.#m)
    });

    let ref_struct = ref_struct(input, fields, &ref_tys, &generics);
    let type_name = name.to_string();

    let field_paths = field_paths(input, fields, &members, &ref_tys, &generics);
    let by_type = if input.by_type {
        by_type_impls(input, fields)
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #ref_struct

        impl #impl_generics ::piecewise::Mutable for #name #ty_generics #where_clause {
            type Ref = #ref_name #ty_generics;

            #[inline]
            fn thaw(&self) -> Self::Ref {
                #ref_name { #(#members: #thaw),* }
            }

            #[inline]
            fn thaw_owned(self) -> Self::Ref {
                let Self { #(#members: #binds),* } = self;
                #ref_name { #(#members: #thaw_owned),* }
            }

            #[inline]
            fn freeze(__ref: &Self::Ref) -> Self {
                Self { #(#members: #freeze),* }
            }

            #[inline]
            fn freeze_owned(__ref: Self::Ref) -> Self {
                let #ref_name { #(#members: #binds),* } = __ref;
                Self { #(#members: #freeze_owned),* }
            }

            #[inline]
            fn copy(__ref: &mut Self::Ref, __value: &Self) {
                #(#copy;)*
            }

            #[inline]
            fn copy_owned(__ref: &mut Self::Ref, __value: Self) {
                let Self { #(#members: #binds),* } = __value;
                #(#copy_owned;)*
            }

            #[inline]
            fn move_ref(__dst: &mut Self::Ref, __src: &Self::Ref) {
                #(#move_ref;)*
            }

            #[inline]
            fn clone_ref(__ref: &Self::Ref) -> Self::Ref {
                #ref_name { #(#members: #clone_ref),* }
            }
        }

        impl #impl_generics ::piecewise::MutRef for #ref_name #ty_generics #where_clause {
            type Value = #name #ty_generics;
        }

        impl #impl_generics ::std::fmt::Debug for #ref_name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(#type_name).finish_non_exhaustive()
            }
        }

        impl #impl_generics ::piecewise::Decompose for #ref_name #ty_generics #where_clause {
            type Parts<'__a> = (#(&'__a #ref_tys,)*) where Self: '__a;
            type PartsMut<'__a> = (#(&'__a mut #ref_tys,)*) where Self: '__a;

            #[inline]
            fn parts(&self) -> Self::Parts<'_> {
                (#(&self.#members,)*)
            }

            #[inline]
            fn parts_mut(&mut self) -> Self::PartsMut<'_> {
                (#(&mut self.#members,)*)
            }
        }

        #field_paths

        #by_type
    })
}

/// The `{Name}Ref` declaration, mirroring the struct's style.
fn ref_struct(
    input: &MutableInput,
    fields: &ast::Fields<FieldInput>,
    ref_tys: &[TokenStream],
    generics: &syn::Generics,
) -> TokenStream {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let vis = &input.vis;
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let doc = format!(
        "Mutable shape of [`{}`]: one independent handle per field.",
        name
    );

    match fields.style {
        Style::Struct => {
            let decls = fields.iter().zip(ref_tys).map(|(f, ty)| {
                let (fvis, ident) = (&f.vis, &f.ident);
                quote!(#fvis #ident: #ty)
            });
            quote! {
                #[doc = #doc]
                #vis struct #ref_name #impl_generics #where_clause {
                    #(#decls,)*
                }
            }
        }
        Style::Tuple => {
            let decls = fields.iter().zip(ref_tys).map(|(f, ty)| {
                let fvis = &f.vis;
                quote!(#fvis #ty)
            });
            quote! {
                #[doc = #doc]
                #vis struct #ref_name #impl_generics (#(#decls,)*) #where_clause;
            }
        }
        Style::Unit => quote! {
            #[doc = #doc]
            #vis struct #ref_name;
        },
    }
}

/// `FieldPath` impls, plus named constructors for named fields.
fn field_paths(
    input: &MutableInput,
    fields: &ast::Fields<FieldInput>,
    members: &[syn::Member],
    ref_tys: &[TokenStream],
    generics: &syn::Generics,
) -> TokenStream {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut impls = TokenStream::new();
    let mut constructors = TokenStream::new();

    for (i, (member, ref_ty)) in members.iter().zip(ref_tys).enumerate() {
        let index = index_lit(i);
        let path_ty = quote!(::piecewise::FieldPath<#name #ty_generics, #index>);

        impls.extend(quote! {
            impl #impl_generics ::piecewise::RefPath<#ref_name #ty_generics> for #path_ty #where_clause {
                type Target = #ref_ty;

                #[inline]
                fn focus<'__a>(
                    &self,
                    __source: &'__a #ref_name #ty_generics,
                ) -> ::piecewise::PiecewiseResult<&'__a Self::Target> {
                    ::std::result::Result::Ok(&__source.#member)
                }

                #[inline]
                fn focus_mut<'__a>(
                    &self,
                    __source: &'__a mut #ref_name #ty_generics,
                ) -> ::piecewise::PiecewiseResult<&'__a mut Self::Target> {
                    ::std::result::Result::Ok(&mut __source.#member)
                }
            }

            impl #impl_generics ::piecewise::TotalPath<#ref_name #ty_generics> for #path_ty #where_clause {
                #[inline]
                fn get<'__a>(&self, __source: &'__a #ref_name #ty_generics) -> &'__a Self::Target {
                    &__source.#member
                }

                #[inline]
                fn get_mut<'__a>(
                    &self,
                    __source: &'__a mut #ref_name #ty_generics,
                ) -> &'__a mut Self::Target {
                    &mut __source.#member
                }
            }
        });

        if let Some(ident) = &fields.fields[i].ident {
            let doc = format!("Path to the `{}` field.", fields.fields[i].name(i));
            constructors.extend(quote! {
                #[doc = #doc]
                #[inline]
                pub const fn #ident() -> #path_ty {
                    ::piecewise::FieldPath::new()
                }
            });
        }
    }

    if !constructors.is_empty() {
        impls.extend(quote! {
            impl #impl_generics #ref_name #ty_generics #where_clause {
                #constructors
            }
        });
    }

    impls
}

/// `ByType` impls for the first field of each distinct type.
fn by_type_impls(input: &MutableInput, fields: &ast::Fields<FieldInput>) -> TokenStream {
    let name = &input.ident;
    let mut seen = HashSet::new();
    let mut impls = TokenStream::new();

    for (i, field) in fields.iter().enumerate() {
        let ty = &field.ty;
        if !seen.insert(quote!(#ty).to_string()) {
            continue;
        }
        let index = index_lit(i);
        impls.extend(quote! {
            impl ::piecewise::ByType<#ty> for #name {
                type Path = ::piecewise::FieldPath<#name, #index>;
            }
        });
    }

    impls
}
