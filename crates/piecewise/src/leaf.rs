//! Leaf operations over `MutCell`.
//!
//! These are the six cell operations for a value treated as one opaque unit.
//! `leaf_mutable!` and derived code for `#[piecewise(leaf)]` fields call them
//! directly, so a field can be stored as a leaf even when its type has no
//! `Mutable` registration of its own.

use crate::MutCell;

/// Allocate a cell holding a copy of `value`.
#[inline]
pub fn thaw<T: Clone>(value: &T) -> MutCell<T> {
    MutCell::new(value.clone())
}

/// Allocate a cell and move `value` into it without copying.
#[inline]
pub fn thaw_owned<T>(value: T) -> MutCell<T> {
    MutCell::new(value)
}

/// Read a copy of the current value.
#[inline]
pub fn freeze<T: Clone>(cell: &MutCell<T>) -> T {
    cell.get().clone()
}

/// Move the value out of the cell without copying.
#[inline]
pub fn freeze_owned<T>(cell: MutCell<T>) -> T {
    cell.into_inner()
}

/// Overwrite the cell with a copy of `value`, reusing its storage where the
/// type allows it.
#[inline]
pub fn copy<T: Clone>(cell: &mut MutCell<T>, value: &T) {
    cell.get_mut().clone_from(value);
}

/// Overwrite the cell by moving `value` in.
#[inline]
pub fn copy_owned<T>(cell: &mut MutCell<T>, value: T) {
    cell.set(value);
}

/// Copy the contents of `src` straight into `dst`.
#[inline]
pub fn move_ref<T: Clone>(dst: &mut MutCell<T>, src: &MutCell<T>) {
    dst.clone_from(src);
}

/// Allocate an independent cell with the same contents.
#[inline]
pub fn clone_ref<T: Clone>(cell: &MutCell<T>) -> MutCell<T> {
    cell.clone()
}
