//! Shared utility functions for code generation.

use crate::field_kind::FieldKind;
use crate::parse::FieldInput;
use darling::ast;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Generics, Ident, Member};

/// Convert an `UpperCamelCase` identifier to `snake_case`.
pub fn snake_case(name: &str) -> String {
    let name = name.trim_start_matches("r#");
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// The member used to access field `index`: its name, or its position.
pub fn member(field: &FieldInput, index: usize) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(syn::Index {
            index: index as u32,
            span: Span::call_site(),
        }),
    }
}

/// Members of every field, in order.
pub fn members(fields: &ast::Fields<FieldInput>) -> Vec<Member> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| member(f, i))
        .collect()
}

/// Local binding names `{prefix}0`, `{prefix}1`, ...
pub fn bindings(prefix: &str, count: usize) -> Vec<Ident> {
    (0..count).map(|i| format_ident!("{}{}", prefix, i)).collect()
}

/// An unsuffixed integer literal.
pub fn index_lit(index: usize) -> syn::LitInt {
    syn::LitInt::new(&index.to_string(), Span::call_site())
}

/// Generics with one extra predicate per field, added only when the
/// container is generic.
pub fn with_field_bounds<'a>(
    generics: &Generics,
    fields: impl IntoIterator<Item = &'a FieldInput>,
) -> Generics {
    let mut generics = generics.clone();
    if generics.params.is_empty() {
        return generics;
    }

    let predicates: Vec<_> = fields
        .into_iter()
        .map(|f| FieldKind::of(f).bound(&f.ty))
        .collect();
    generics.make_where_clause().predicates.extend(predicates);
    generics
}

/// Right-nested binary tree of `items` joined by `node`, or `empty` when there
/// are none: `[a, b, c]` becomes `node(a, node(b, c))`.
pub fn nest(
    items: Vec<TokenStream>,
    empty: TokenStream,
    node: impl Fn(TokenStream, TokenStream) -> TokenStream,
) -> TokenStream {
    let mut iter = items.into_iter().rev();
    match iter.next() {
        None => empty,
        Some(last) => iter.fold(last, |acc, item| node(item, acc)),
    }
}

/// `Product` type over `items`.
pub fn product_type(items: Vec<TokenStream>) -> TokenStream {
    nest(
        items,
        quote!(::piecewise::generic::Unit),
        |a, b| quote!(::piecewise::generic::Product<#a, #b>),
    )
}

/// `Product` value (or pattern) over `items`.
pub fn product_value(items: Vec<TokenStream>) -> TokenStream {
    nest(
        items,
        quote!(::piecewise::generic::Unit),
        |a, b| quote!(::piecewise::generic::Product(#a, #b)),
    )
}

/// `Sum` type over `items`.
pub fn sum_type(items: Vec<TokenStream>) -> TokenStream {
    nest(
        items,
        quote!(::piecewise::generic::Void),
        |a, b| quote!(::piecewise::generic::Sum<#a, #b>),
    )
}

/// Injection of `value` as alternative `index` of a right-nested `Sum` with
/// `count` alternatives. Works for both expressions and patterns.
pub fn sum_injection(index: usize, count: usize, value: TokenStream) -> TokenStream {
    let mut out = if index + 1 < count {
        quote!(::piecewise::generic::Sum::Left(#value))
    } else {
        value
    };
    for _ in 0..index.min(count.saturating_sub(1)) {
        out = quote!(::piecewise::generic::Sum::Right(#out));
    }
    out
}
