//! The `Mutable` registry: value types and their mutable shapes.
//!
//! Every registered value type names exactly one mutable-shape type through
//! `Mutable::Ref`, and every mutable-shape type names its value type back
//! through `MutRef::Value`. The two bounds together make the mapping
//! injective: two value types can never share a reference type.

/// A value type that can be thawed into a piecewise mutable shape.
///
/// Only `thaw` and `freeze` are required; the remaining operations have
/// defaults that round-trip through a plain value. Implementations produced
/// by `#[derive(Mutable)]` override all of them so that each field is
/// touched independently.
///
/// # Example
///
/// ```
/// use piecewise::{MutCell, Mutable, RefExt};
///
/// let mut cell: MutCell<i64> = 41_i64.thaw();
/// cell.update(|v| *v += 1);
/// assert_eq!(cell.freeze(), 42);
/// ```
///
/// A registration that points at another type's reference is rejected:
///
/// ```compile_fail
/// use piecewise::{MutCell, Mutable};
///
/// #[derive(Clone)]
/// struct Meters(f64);
///
/// impl Mutable for Meters {
///     // `MutCell<f64>` already belongs to `f64`.
///     type Ref = MutCell<f64>;
///
///     fn thaw(&self) -> Self::Ref {
///         MutCell::new(self.0)
///     }
///
///     fn freeze(r: &Self::Ref) -> Self {
///         Meters(*r.get())
///     }
/// }
/// ```
pub trait Mutable: Sized {
    /// The mutable shape of this type.
    type Ref: MutRef<Value = Self>;

    /// Allocate a fresh mutable shape holding a copy of `self`.
    fn thaw(&self) -> Self::Ref;

    /// Thaw by moving `self` into the mutable shape, reusing its storage.
    fn thaw_owned(self) -> Self::Ref {
        Self::thaw(&self)
    }

    /// Read a snapshot of the current value.
    fn freeze(r: &Self::Ref) -> Self;

    /// Consume the mutable shape and move its storage out as a value.
    fn freeze_owned(r: Self::Ref) -> Self {
        Self::freeze(&r)
    }

    /// Overwrite the contents of `r` with `value`.
    fn copy(r: &mut Self::Ref, value: &Self) {
        *r = Self::thaw(value);
    }

    /// Overwrite the contents of `r`, moving `value` into it.
    fn copy_owned(r: &mut Self::Ref, value: Self) {
        *r = Self::thaw_owned(value);
    }

    /// Copy the current contents of `src` into `dst`.
    fn move_ref(dst: &mut Self::Ref, src: &Self::Ref) {
        Self::copy_owned(dst, Self::freeze(src));
    }

    /// Allocate an independent mutable shape with the same contents.
    fn clone_ref(r: &Self::Ref) -> Self::Ref {
        Self::thaw_owned(Self::freeze(r))
    }
}

/// A mutable shape, naming the value type it was derived from.
pub trait MutRef: Sized {
    /// The value type this shape mirrors.
    type Value: Mutable<Ref = Self>;
}

/// Method forms of the `Mutable` operations on a mutable shape.
pub trait RefExt: MutRef {
    /// Read a snapshot of the current value.
    #[inline]
    fn freeze(&self) -> Self::Value {
        <Self::Value as Mutable>::freeze(self)
    }

    /// Consume the shape, moving its storage out as a value.
    #[inline]
    fn into_value(self) -> Self::Value {
        <Self::Value as Mutable>::freeze_owned(self)
    }

    /// Overwrite the contents with a copy of `value`.
    #[inline]
    fn copy_from(&mut self, value: &Self::Value) {
        <Self::Value as Mutable>::copy(self, value)
    }

    /// Overwrite the contents, moving `value` in.
    #[inline]
    fn copy_from_owned(&mut self, value: Self::Value) {
        <Self::Value as Mutable>::copy_owned(self, value)
    }

    /// Copy the current contents of `src` into `self`.
    #[inline]
    fn move_from(&mut self, src: &Self) {
        <Self::Value as Mutable>::move_ref(self, src)
    }

    /// Allocate an independent shape with the same contents.
    #[inline]
    fn clone_ref(&self) -> Self {
        <Self::Value as Mutable>::clone_ref(self)
    }

    /// Replace the contents with `f` applied to the current value.
    fn modify(&mut self, f: impl FnOnce(Self::Value) -> Self::Value) {
        let next = f(self.freeze());
        self.copy_from_owned(next);
    }

    /// Like `modify`, additionally returning a result computed by `f`.
    fn modify_with<B>(&mut self, f: impl FnOnce(Self::Value) -> (Self::Value, B)) -> B {
        let (next, out) = f(self.freeze());
        self.copy_from_owned(next);
        out
    }
}

impl<R: MutRef> RefExt for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MutCell;

    /// A hand-registered type using only the required operations.
    #[derive(Debug, Clone, PartialEq)]
    struct Celsius(f64);

    struct CelsiusRef(MutCell<f64>);

    impl MutRef for CelsiusRef {
        type Value = Celsius;
    }

    impl Mutable for Celsius {
        type Ref = CelsiusRef;

        fn thaw(&self) -> CelsiusRef {
            CelsiusRef(MutCell::new(self.0))
        }

        fn freeze(r: &CelsiusRef) -> Self {
            Celsius(*r.0.get())
        }
    }

    #[test]
    fn test_default_operations_round_trip() {
        let mut r = Celsius(21.5).thaw();
        assert_eq!(r.freeze(), Celsius(21.5));

        r.copy_from(&Celsius(-4.0));
        assert_eq!(r.freeze(), Celsius(-4.0));

        let cloned = r.clone_ref();
        r.copy_from_owned(Celsius(100.0));
        assert_eq!(cloned.freeze(), Celsius(-4.0));

        let mut other = Celsius(0.0).thaw();
        other.move_from(&r);
        assert_eq!(other.into_value(), Celsius(100.0));
    }

    #[test]
    fn test_modify_and_modify_with() {
        let mut r = Celsius(10.0).thaw();
        r.modify(|c| Celsius(c.0 * 2.0));
        assert_eq!(r.freeze(), Celsius(20.0));

        let old = r.modify_with(|c| (Celsius(c.0 + 1.0), c.0));
        assert_eq!(old, 20.0);
        assert_eq!(r.freeze(), Celsius(21.0));
    }
}
