//! Derive macro for the piecewise `Mutable` trait.
//!
//! This crate provides the `#[derive(Mutable)]` macro. For a struct it
//! generates:
//! - `{Name}Ref`: the mutable shape, with one handle per field
//! - `impl Mutable for {Name}` and `impl MutRef for {Name}Ref`
//! - a `FieldPath` per field and a named path constructor per named field
//! - `impl Decompose for {Name}Ref`
//!
//! For an enum it generates `{Name}Branch` (one branch per variant, holding
//! the variant's field handles), `{Name}Ref` (a boxed slot holding the active
//! branch) and a `VariantPath` per variant field.
//!
//! # Usage
//!
//! ```ignore
//! use piecewise::{Mutable, RefExt, TotalPath};
//!
//! #[derive(Clone, Mutable)]
//! struct Stats {
//!     count: i64,
//!     items: Vec<f64>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod field_kind;
mod parse;

/// Derive the `Mutable` trait for a struct or enum.
///
/// # Attributes
///
/// ## Container Attributes
///
/// - `#[piecewise(leaf)]`: store the whole value in one `MutCell` (requires
///   `Clone`).
/// - `#[piecewise(generic)]`: derive the mutable shape through the structural
///   representation engine (`piecewise::generic`). No ref type is generated;
///   the shape is `GRef<Self>` and is navigated with representation paths.
///   Requires `Clone`.
/// - `#[piecewise(by_type)]`: implement `ByType<F>` for the first field of
///   each distinct type `F`. Resolution is by declaration order, so adding or
///   reordering fields silently changes the target. Non-generic structs only.
/// - `#[piecewise(ref_name = "Name")]`: name of the generated ref type.
///
/// ## Field Attributes
///
/// - `#[piecewise(leaf)]`: store the field in a single `MutCell`, even if its
///   type has no `Mutable` registration (requires `Clone`).
///
/// # Examples
///
/// ```ignore
/// use piecewise::{Mutable, RefExt, TotalPath};
///
/// #[derive(Debug, Clone, PartialEq, Mutable)]
/// enum Shape {
///     Circle { radius: f64 },
///     Rect(f64, f64),
/// }
///
/// let mut r = Shape::Circle { radius: 1.0 }.thaw();
///
/// // Field handles are reached through paths
/// ShapeRef::circle_radius().focus_mut(&mut r)?.set(2.0);
///
/// // Copying another variant replaces the branch
/// r.copy_from(&Shape::Rect(3.0, 4.0));
/// assert_eq!(r.variant_name(), "Rect");
/// ```
#[proc_macro_derive(Mutable, attributes(piecewise))]
pub fn derive_mutable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match codegen::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
