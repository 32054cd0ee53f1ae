//! Single mutable storage cells.
//!
//! `MutCell<T>` is the default mutable shape of a leaf: one boxed slot that
//! holds one value and treats it as opaque.

use crate::{MutRef, Mutable};
use std::fmt;

/// A single boxed mutable slot.
///
/// The slot lives on the heap, so swapping two cells or moving a cell
/// around never copies the stored value.
pub struct MutCell<T>(Box<T>);

impl<T> MutCell<T> {
    /// Allocate a new cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow the current value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.0
    }

    /// Mutably borrow the current value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Overwrite the value.
    #[inline]
    pub fn set(&mut self, value: T) {
        *self.0 = value;
    }

    /// Overwrite the value, returning the previous one.
    #[inline]
    pub fn replace(&mut self, value: T) -> T {
        std::mem::replace(&mut *self.0, value)
    }

    /// Exchange the contents of two cells.
    #[inline]
    pub fn swap(&mut self, other: &mut MutCell<T>) {
        std::mem::swap(&mut self.0, &mut other.0);
    }

    /// Mutate the value in place.
    #[inline]
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0)
    }

    /// Consume the cell and return the value.
    #[inline]
    pub fn into_inner(self) -> T {
        *self.0
    }
}

impl<T: Clone> Clone for MutCell<T> {
    fn clone(&self) -> Self {
        Self::new((*self.0).clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

impl<T: Default> Default for MutCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for MutCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutCell").field(&self.0).finish()
    }
}

impl<T: PartialEq> PartialEq for MutCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> From<T> for MutCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> MutRef for MutCell<T>
where
    T: Mutable<Ref = MutCell<T>>,
{
    type Value = T;
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for MutCell<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for MutCell<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(MutCell::new)
    }
}

/// Register types as leaves whose mutable shape is a single `MutCell`.
///
/// The types must implement `Clone`.
///
/// ```
/// use piecewise::{leaf_mutable, Mutable, RefExt};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Token(u64);
///
/// leaf_mutable!(Token);
///
/// let mut cell = Token(1).thaw();
/// cell.set(Token(2));
/// assert_eq!(cell.freeze(), Token(2));
/// ```
#[macro_export]
macro_rules! leaf_mutable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Mutable for $ty {
                type Ref = $crate::MutCell<$ty>;

                #[inline]
                fn thaw(&self) -> Self::Ref {
                    $crate::leaf::thaw(self)
                }

                #[inline]
                fn thaw_owned(self) -> Self::Ref {
                    $crate::leaf::thaw_owned(self)
                }

                #[inline]
                fn freeze(r: &Self::Ref) -> Self {
                    $crate::leaf::freeze(r)
                }

                #[inline]
                fn freeze_owned(r: Self::Ref) -> Self {
                    $crate::leaf::freeze_owned(r)
                }

                #[inline]
                fn copy(r: &mut Self::Ref, value: &Self) {
                    $crate::leaf::copy(r, value)
                }

                #[inline]
                fn copy_owned(r: &mut Self::Ref, value: Self) {
                    $crate::leaf::copy_owned(r, value)
                }

                #[inline]
                fn move_ref(dst: &mut Self::Ref, src: &Self::Ref) {
                    $crate::leaf::move_ref(dst, src)
                }

                #[inline]
                fn clone_ref(r: &Self::Ref) -> Self::Ref {
                    $crate::leaf::clone_ref(r)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_get_set_replace() {
        let mut cell = MutCell::new(String::from("a"));
        assert_eq!(cell.get(), "a");

        cell.set("b".to_string());
        assert_eq!(cell.get(), "b");

        let old = cell.replace("c".to_string());
        assert_eq!(old, "b");
        assert_eq!(cell.into_inner(), "c");
    }

    #[test]
    fn test_cell_swap_exchanges_storage() {
        let mut a = MutCell::new(vec![1, 2, 3]);
        let mut b = MutCell::new(vec![9]);
        let a_ptr = a.get().as_ptr();

        a.swap(&mut b);

        assert_eq!(a.get(), &vec![9]);
        assert_eq!(b.get(), &vec![1, 2, 3]);
        assert_eq!(b.get().as_ptr(), a_ptr);
    }

    #[test]
    fn test_cell_clone_is_independent() {
        let mut a = MutCell::new(10);
        let b = a.clone();
        a.update(|v| *v += 5);
        assert_eq!(*a.get(), 15);
        assert_eq!(*b.get(), 10);
    }

    #[test]
    fn test_cell_update_returns_result() {
        let mut cell = MutCell::new(vec![1]);
        let len = cell.update(|v| {
            v.push(2);
            v.len()
        });
        assert_eq!(len, 2);
    }
}
