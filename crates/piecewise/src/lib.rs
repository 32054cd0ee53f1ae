//! Piecewise mutable references for immutable composite values.
//!
//! `piecewise` turns a plain value into a *mutable shape*: the same structure
//! with every leaf replaced by its own [`MutCell`]. Updating one component of
//! the shape touches only that component's cell; sibling components are never
//! copied or rebuilt.
//!
//! # Core Concepts
//!
//! - **Thaw / freeze**: [`Mutable::thaw`] builds the mutable shape of a value,
//!   [`Mutable::freeze`] reads a snapshot back. `thaw_owned` / `freeze_owned`
//!   move storage instead of copying it.
//! - **Mutable shape**: the `Ref` type registered for a value type. Products
//!   stay products; sums become a boxed slot holding the active variant.
//! - **Paths**: [`RefPath`] values focus a handle on one component. Field
//!   paths are total ([`TotalPath`]); variant and element paths can fail with
//!   [`PiecewiseError`].
//!
//! # Quick Start
//!
//! ```
//! use piecewise::{Mutable, RefExt, TotalPath};
//!
//! #[derive(Debug, Clone, PartialEq, Mutable)]
//! struct Stats {
//!     count: i64,
//!     items: Vec<f64>,
//! }
//!
//! let mut r = Stats { count: 0, items: vec![1.0, 2.0] }.thaw();
//!
//! StatsRef::count().get_mut(&mut r).update(|c| *c += 1);
//! r.items.get_mut().push(3.0);
//!
//! assert_eq!(r.freeze(), Stats { count: 1, items: vec![1.0, 2.0, 3.0] });
//! ```
//!
//! # Registration
//!
//! - `#[derive(Mutable)]` on structs and enums (see the derive docs for the
//!   `#[piecewise(...)]` options).
//! - [`leaf_mutable!`] for opaque types stored in a single cell.
//! - A hand-written `impl Mutable` whose `Ref` implements [`MutRef`].
//!
//! # Features
//!
//! - `derive` (default): re-exports `#[derive(Mutable)]`.
//! - `serde`: transparent `Serialize` / `Deserialize` for [`MutCell`] and
//!   [`Elements`].
//!
//! # Static Guarantees
//!
//! Derived handles are reborrows of the top-level shape, so two overlapping
//! mutable handles cannot coexist:
//!
//! ```compile_fail
//! use piecewise::{Mutable, TotalPath};
//!
//! #[derive(Clone, Mutable)]
//! struct Pair {
//!     a: u8,
//!     b: u8,
//! }
//!
//! let mut r = Pair { a: 1, b: 2 }.thaw();
//! let whole = &mut r;
//! let a = PairRef::a().get_mut(&mut r);
//! a.set(3);
//! whole.b.set(4);
//! ```
//!
//! Array positions are checked against the array length:
//!
//! ```compile_fail
//! use piecewise::{ArrayIndex, Mutable, TotalPath};
//!
//! let r = [1_u8, 2, 3].thaw();
//! ArrayIndex::<5>.get(&r);
//! ```
//!
//! Conflicting derive options are rejected at compile time:
//!
//! ```compile_fail
//! use piecewise::Mutable;
//!
//! #[derive(Clone, Mutable)]
//! #[piecewise(leaf, generic)]
//! struct Both {
//!     x: i32,
//! }
//! ```
//!
//! ```compile_fail
//! use piecewise::Mutable;
//!
//! #[derive(Clone, Mutable)]
//! #[piecewise(by_type)]
//! enum Lookup {
//!     A(u8),
//! }
//! ```

mod cell;
mod elements;
mod error;
mod instances;
mod mutable;
mod parts;
mod path;

pub mod generic;
pub mod leaf;

pub use cell::MutCell;
pub use elements::{ArrayIndex, ArrayRef, Elements, ElementsRef};
pub use error::{PiecewiseError, PiecewiseResult};
pub use instances::{Tuple2Ref, Tuple3Ref, Tuple4Ref, Tuple5Ref, Tuple6Ref};
pub use mutable::{MutRef, Mutable, RefExt};
pub use parts::{
    clone_part, copy_part, freeze_part, modify_part, move_part_into, move_part_over,
    move_part_within, with_part, with_thawed, Decompose,
};
pub use path::{
    by_type, compose, ByType, Compose, ElementAt, FieldPath, Id, RefPath, TotalPath, VariantPath,
};

#[cfg(feature = "derive")]
pub use piecewise_derive::Mutable;

#[doc(hidden)]
pub mod __private {
    /// Report a variant switch in a derived enum ref.
    #[inline]
    pub fn note_branch_switch(type_name: &'static str, from: &'static str, to: &'static str) {
        tracing::trace!(type_name, from, to, "branch switched");
    }
}
