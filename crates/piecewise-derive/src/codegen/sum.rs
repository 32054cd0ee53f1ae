//! Mutable shape generation for enums.
//!
//! An enum's mutable shape is a boxed, re-assignable slot holding a
//! `{Name}Branch`: one branch variant per enum variant, each carrying the
//! handles of that variant's fields. Copying a value with the same variant
//! recurses into the fields; copying a different variant replaces the whole
//! branch in one assignment.

use super::utils::{bindings, index_lit, members, snake_case, with_field_bounds};
use crate::field_kind::FieldKind;
use crate::parse::{MutableInput, VariantInput};
use darling::ast::Style;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Member, Type};

/// Per-variant data used by every generated item.
struct VariantInfo<'a> {
    ident: &'a Ident,
    name: String,
    style: Style,
    members: Vec<Member>,
    kinds: Vec<FieldKind>,
    tys: Vec<&'a Type>,
    ref_tys: Vec<TokenStream>,
}

impl<'a> VariantInfo<'a> {
    fn new(variant: &'a VariantInput) -> Self {
        let kinds: Vec<FieldKind> = variant.fields.iter().map(FieldKind::of).collect();
        let tys: Vec<&Type> = variant.fields.iter().map(|f| &f.ty).collect();
        let ref_tys = kinds
            .iter()
            .zip(&tys)
            .map(|(kind, ty)| kind.ref_type(ty))
            .collect();
        Self {
            ident: &variant.ident,
            name: variant.ident.to_string(),
            style: variant.fields.style,
            members: members(&variant.fields),
            kinds,
            tys,
            ref_tys,
        }
    }

    /// Braced pattern or constructor `{ m0: b0, m1: b1 }`.
    fn braced(&self, values: &[TokenStream]) -> TokenStream {
        let members = &self.members;
        quote!({ #(#members: #values),* })
    }

    /// Identifiers as token streams.
    fn binds(&self, prefix: &str) -> Vec<TokenStream> {
        bindings(prefix, self.members.len())
            .into_iter()
            .map(|b| quote!(#b))
            .collect()
    }

    /// Calls to `op` for every field, with `args(binding index)`.
    fn ops(&self, op: &str, args: impl Fn(usize) -> TokenStream) -> Vec<TokenStream> {
        (0..self.members.len())
            .map(|i| self.kinds[i].op(self.tys[i], op, args(i)))
            .collect()
    }
}

/// Generate the ref struct, branch enum and trait impls for an enum.
/// Inherent methods of the generated enum ref.
pub const REF_METHODS: &[&str] = &["new", "branch", "branch_mut", "set_branch", "variant_name"];

/// Name of the `VariantPath` constructor for `field` of `variant`.
pub fn path_constructor(variant: &str, field: &str) -> String {
    format!("{}_{}", snake_case(variant), field)
}

pub fn generate(input: &MutableInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let branch = input.branch_ident();
    let vis = &input.vis;
    let type_name = name.to_string();

    let generics = with_field_bounds(&input.generics, input.all_fields());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let variants: Vec<VariantInfo> = input.variants().iter().map(VariantInfo::new).collect();

    let branch_decls = variants.iter().map(|v| {
        let ident = v.ident;
        let ref_tys = &v.ref_tys;
        match v.style {
            Style::Struct => {
                let members = &v.members;
                quote!(#ident { #(#members: #ref_tys),* })
            }
            Style::Tuple => quote!(#ident(#(#ref_tys),*)),
            Style::Unit => quote!(#ident),
        }
    });

    let ref_doc = format!(
        "Mutable shape of [`{}`]: a re-assignable slot holding the active branch.",
        name
    );
    let branch_doc = format!("Handles of the fields of one [`{}`] variant.", name);

    let branch_impl = branch_impl(&variants, input, &generics);
    let mutable_impl = if variants.is_empty() {
        empty_mutable_impl(input, &generics)
    } else {
        mutable_impl(&variants, input, &generics)
    };
    let variant_paths = variant_paths(&variants, input, &generics);

    Ok(quote! {
        #[doc = #branch_doc]
        #vis enum #branch #impl_generics #where_clause {
            #(#branch_decls,)*
        }

        #[doc = #ref_doc]
        #vis struct #ref_name #impl_generics #where_clause {
            slot: ::std::boxed::Box<#branch #ty_generics>,
        }

        impl #impl_generics #ref_name #ty_generics #where_clause {
            /// Create a ref holding `branch`.
            #[inline]
            pub fn new(branch: #branch #ty_generics) -> Self {
                Self {
                    slot: ::std::boxed::Box::new(branch),
                }
            }

            /// The active branch.
            #[inline]
            pub fn branch(&self) -> &#branch #ty_generics {
                &self.slot
            }

            /// The active branch, mutably.
            #[inline]
            pub fn branch_mut(&mut self) -> &mut #branch #ty_generics {
                &mut self.slot
            }

            /// Replace the active branch, returning the previous one.
            pub fn set_branch(&mut self, branch: #branch #ty_generics) -> #branch #ty_generics {
                let previous = ::std::mem::replace(&mut *self.slot, branch);
                ::piecewise::__private::note_branch_switch(
                    #type_name,
                    previous.variant_name(),
                    self.slot.variant_name(),
                );
                previous
            }

            /// Name of the active variant.
            #[inline]
            pub fn variant_name(&self) -> &'static str {
                self.slot.variant_name()
            }
        }

        #branch_impl

        #mutable_impl

        impl #impl_generics ::piecewise::MutRef for #ref_name #ty_generics #where_clause {
            type Value = #name #ty_generics;
        }

        impl #impl_generics ::std::fmt::Debug for #ref_name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(#type_name).field(&self.variant_name()).finish()
            }
        }

        #variant_paths
    })
}

/// Inherent helpers on the branch enum.
fn branch_impl(
    variants: &[VariantInfo],
    input: &MutableInput,
    generics: &syn::Generics,
) -> TokenStream {
    let name = &input.ident;
    let branch = input.branch_ident();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if variants.is_empty() {
        return quote! {
            impl #impl_generics #branch #ty_generics #where_clause {
                /// Name of the variant this branch mirrors.
                pub fn variant_name(&self) -> &'static str {
                    match *self {}
                }
            }
        };
    }

    let names = variants.iter().map(|v| {
        let (ident, name) = (v.ident, &v.name);
        quote!(Self::#ident { .. } => #name)
    });

    let thaw_from = variants.iter().map(|v| {
        let ident = v.ident;
        let binds = v.binds("__f");
        let pat = v.braced(&binds);
        let fields = v.braced(&v.ops("thaw", |i| binds[i].clone()));
        quote!(#name::#ident #pat => Self::#ident #fields)
    });

    let thaw_from_owned = variants.iter().map(|v| {
        let ident = v.ident;
        let binds = v.binds("__f");
        let pat = v.braced(&binds);
        let fields = v.braced(&v.ops("thaw_owned", |i| binds[i].clone()));
        quote!(#name::#ident #pat => Self::#ident #fields)
    });

    let clone_branch = variants.iter().map(|v| {
        let ident = v.ident;
        let binds = v.binds("__f");
        let pat = v.braced(&binds);
        let fields = v.braced(&v.ops("clone_ref", |i| binds[i].clone()));
        quote!(Self::#ident #pat => Self::#ident #fields)
    });

    quote! {
        impl #impl_generics #branch #ty_generics #where_clause {
            /// Name of the variant this branch mirrors.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    #(#names,)*
                }
            }

            fn thaw_from(value: &#name #ty_generics) -> Self {
                match value {
                    #(#thaw_from,)*
                }
            }

            fn thaw_from_owned(value: #name #ty_generics) -> Self {
                match value {
                    #(#thaw_from_owned,)*
                }
            }

            fn clone_branch(&self) -> Self {
                match self {
                    #(#clone_branch,)*
                }
            }
        }
    }
}

/// `Mutable` for an enum with at least one variant.
fn mutable_impl(
    variants: &[VariantInfo],
    input: &MutableInput,
    generics: &syn::Generics,
) -> TokenStream {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let branch = input.branch_ident();
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let freeze = variants.iter().map(|v| {
        let ident = v.ident;
        let binds = v.binds("__f");
        let pat = v.braced(&binds);
        let fields = v.braced(&v.ops("freeze", |i| binds[i].clone()));
        quote!(#branch::#ident #pat => Self::#ident #fields)
    });

    let freeze_owned = variants.iter().map(|v| {
        let ident = v.ident;
        let binds = v.binds("__f");
        let pat = v.braced(&binds);
        let fields = v.braced(&v.ops("freeze_owned", |i| binds[i].clone()));
        quote!(#branch::#ident #pat => Self::#ident #fields)
    });

    let same_variant = |op: &'static str, src_path: TokenStream| {
        let src_path = &src_path;
        variants
            .iter()
            .map(|v| {
                let ident = v.ident;
                let dst = v.binds("__d");
                let src = v.binds("__s");
                let (dst_pat, src_pat) = (v.braced(&dst), v.braced(&src));
                let calls = v.ops(op, |i| {
                    let (d, s) = (&dst[i], &src[i]);
                    quote!(#d, #s)
                });
                quote! {
                    (#branch::#ident #dst_pat, #src_path::#ident #src_pat) => {
                        #(#calls;)*
                    }
                }
            })
            .collect::<Vec<_>>()
    };

    let copy_arms = same_variant("copy", quote!(Self));
    let copy_owned_arms = same_variant("copy_owned", quote!(Self));
    let move_arms = same_variant("move_ref", quote!(#branch));

    quote! {
        impl #impl_generics ::piecewise::Mutable for #name #ty_generics #where_clause {
            type Ref = #ref_name #ty_generics;

            #[inline]
            fn thaw(&self) -> Self::Ref {
                #ref_name::new(#branch::thaw_from(self))
            }

            #[inline]
            fn thaw_owned(self) -> Self::Ref {
                #ref_name::new(#branch::thaw_from_owned(self))
            }

            fn freeze(__ref: &Self::Ref) -> Self {
                match &*__ref.slot {
                    #(#freeze,)*
                }
            }

            fn freeze_owned(__ref: Self::Ref) -> Self {
                let __branch = *__ref.slot;
                match __branch {
                    #(#freeze_owned,)*
                }
            }

            fn copy(__ref: &mut Self::Ref, __value: &Self) {
                match (&mut *__ref.slot, __value) {
                    #(#copy_arms)*
                    #[allow(unreachable_patterns)]
                    (__active, __value) => {
                        let __from = __active.variant_name();
                        *__active = #branch::thaw_from(__value);
                        ::piecewise::__private::note_branch_switch(
                            #type_name,
                            __from,
                            __active.variant_name(),
                        );
                    }
                }
            }

            fn copy_owned(__ref: &mut Self::Ref, __value: Self) {
                match (&mut *__ref.slot, __value) {
                    #(#copy_owned_arms)*
                    #[allow(unreachable_patterns)]
                    (__active, __value) => {
                        let __from = __active.variant_name();
                        *__active = #branch::thaw_from_owned(__value);
                        ::piecewise::__private::note_branch_switch(
                            #type_name,
                            __from,
                            __active.variant_name(),
                        );
                    }
                }
            }

            fn move_ref(__dst: &mut Self::Ref, __src: &Self::Ref) {
                match (&mut *__dst.slot, &*__src.slot) {
                    #(#move_arms)*
                    #[allow(unreachable_patterns)]
                    (__active, __other) => {
                        let __from = __active.variant_name();
                        *__active = __other.clone_branch();
                        ::piecewise::__private::note_branch_switch(
                            #type_name,
                            __from,
                            __active.variant_name(),
                        );
                    }
                }
            }

            #[inline]
            fn clone_ref(__ref: &Self::Ref) -> Self::Ref {
                #ref_name::new(__ref.slot.clone_branch())
            }
        }
    }
}

/// `Mutable` for an enum without variants: every operation is unreachable.
fn empty_mutable_impl(input: &MutableInput, generics: &syn::Generics) -> TokenStream {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::piecewise::Mutable for #name #ty_generics #where_clause {
            type Ref = #ref_name #ty_generics;

            fn thaw(&self) -> Self::Ref {
                match *self {}
            }

            fn thaw_owned(self) -> Self::Ref {
                match self {}
            }

            fn freeze(__ref: &Self::Ref) -> Self {
                match *__ref.slot {}
            }

            fn freeze_owned(__ref: Self::Ref) -> Self {
                match *__ref.slot {}
            }

            fn copy(_: &mut Self::Ref, __value: &Self) {
                match *__value {}
            }

            fn copy_owned(_: &mut Self::Ref, __value: Self) {
                match __value {}
            }

            fn move_ref(_: &mut Self::Ref, __src: &Self::Ref) {
                match *__src.slot {}
            }

            fn clone_ref(__ref: &Self::Ref) -> Self::Ref {
                match *__ref.slot {}
            }
        }
    }
}

/// `VariantPath` impls and their constructors on the ref type.
fn variant_paths(
    variants: &[VariantInfo],
    input: &MutableInput,
    generics: &syn::Generics,
) -> TokenStream {
    let name = &input.ident;
    let ref_name = input.ref_ident();
    let branch = input.branch_ident();
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut impls = TokenStream::new();
    let mut constructors = TokenStream::new();

    for (v, variant) in variants.iter().enumerate() {
        let ident = variant.ident;
        let vname = &variant.name;
        let v_lit = index_lit(v);

        for (i, (member, ref_ty)) in variant.members.iter().zip(&variant.ref_tys).enumerate() {
            let i_lit = index_lit(i);
            let path_ty = quote!(::piecewise::VariantPath<#name #ty_generics, #v_lit, #i_lit>);

            impls.extend(quote! {
                impl #impl_generics ::piecewise::RefPath<#ref_name #ty_generics> for #path_ty #where_clause {
                    type Target = #ref_ty;

                    fn focus<'__a>(
                        &self,
                        __source: &'__a #ref_name #ty_generics,
                    ) -> ::piecewise::PiecewiseResult<&'__a Self::Target> {
                        match &*__source.slot {
                            #branch::#ident { #member: __target, .. } => {
                                ::std::result::Result::Ok(__target)
                            }
                            #[allow(unreachable_patterns)]
                            __other => ::std::result::Result::Err(
                                ::piecewise::PiecewiseError::inactive_branch(
                                    #type_name,
                                    #vname,
                                    __other.variant_name(),
                                ),
                            ),
                        }
                    }

                    fn focus_mut<'__a>(
                        &self,
                        __source: &'__a mut #ref_name #ty_generics,
                    ) -> ::piecewise::PiecewiseResult<&'__a mut Self::Target> {
                        match &mut *__source.slot {
                            #branch::#ident { #member: __target, .. } => {
                                ::std::result::Result::Ok(__target)
                            }
                            #[allow(unreachable_patterns)]
                            __other => ::std::result::Result::Err(
                                ::piecewise::PiecewiseError::inactive_branch(
                                    #type_name,
                                    #vname,
                                    __other.variant_name(),
                                ),
                            ),
                        }
                    }
                }
            });

            let field_name = match member {
                Member::Named(field) => field.to_string().trim_start_matches("r#").to_string(),
                Member::Unnamed(index) => index.index.to_string(),
            };
            let ctor = format_ident!("{}", path_constructor(vname, &field_name));
            let doc = format!("Path to field `{}` of variant `{}`.", field_name, vname);
            constructors.extend(quote! {
                #[doc = #doc]
                #[inline]
                pub const fn #ctor() -> #path_ty {
                    ::piecewise::VariantPath::new()
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
