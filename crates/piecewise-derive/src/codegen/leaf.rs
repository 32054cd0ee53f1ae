//! Whole-value leaf registration for `#[piecewise(leaf)]`.

use crate::parse::MutableInput;
use proc_macro2::TokenStream;
use quote::quote;

/// Generate a `Mutable` impl storing the whole value in one `MutCell`.
pub fn generate(input: &MutableInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let mut generics = input.generics.clone();
    let (_, ty_generics, _) = input.generics.split_for_impl();
    generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote!(#name #ty_generics: ::std::clone::Clone));
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::piecewise::Mutable for #name #ty_generics #where_clause {
            type Ref = ::piecewise::MutCell<Self>;

            #[inline]
            fn thaw(&self) -> Self::Ref {
                ::piecewise::leaf::thaw(self)
            }

            #[inline]
            fn thaw_owned(self) -> Self::Ref {
                ::piecewise::leaf::thaw_owned(self)
            }

            #[inline]
            fn freeze(__ref: &Self::Ref) -> Self {
                ::piecewise::leaf::freeze(__ref)
            }

            #[inline]
            fn freeze_owned(__ref: Self::Ref) -> Self {
                ::piecewise::leaf::freeze_owned(__ref)
            }

            #[inline]
            fn copy(__ref: &mut Self::Ref, __value: &Self) {
                ::piecewise::leaf::copy(__ref, __value)
            }

            #[inline]
            fn copy_owned(__ref: &mut Self::Ref, __value: Self) {
                ::piecewise::leaf::copy_owned(__ref, __value)
            }

            #[inline]
            fn move_ref(__dst: &mut Self::Ref, __src: &Self::Ref) {
                ::piecewise::leaf::move_ref(__dst, __src)
            }

            #[inline]
            fn clone_ref(__ref: &Self::Ref) -> Self::Ref {
                ::piecewise::leaf::clone_ref(__ref)
            }
        }
    })
}
