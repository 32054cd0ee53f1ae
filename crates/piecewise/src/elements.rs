//! Traversal containers: one mutable shape per element.
//!
//! A plain `Vec<T>` is a leaf (one cell for the whole vector). Wrapping it in
//! [`Elements`] instead thaws every element separately, so a single element
//! can be updated without touching its neighbours. Fixed-size arrays are
//! always element-wise.

use crate::{ElementAt, MutRef, Mutable, PiecewiseError, PiecewiseResult, RefPath, TotalPath};
use std::fmt;

/// A vector whose mutable shape holds one mutable shape per element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Elements<T>(pub Vec<T>);

impl<T> Elements<T> {
    /// Wrap a vector.
    #[inline]
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    /// Unwrap the vector.
    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for Elements<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for Elements<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mutable shape of [`Elements`].
pub struct ElementsRef<T: Mutable> {
    items: Vec<T::Ref>,
}

impl<T: Mutable> ElementsRef<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the handle of element `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T::Ref> {
        self.items.get(index)
    }

    /// Mutably borrow the handle of element `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T::Ref> {
        self.items.get_mut(index)
    }

    /// Iterate over element handles.
    pub fn iter(&self) -> std::slice::Iter<'_, T::Ref> {
        self.items.iter()
    }

    /// Iterate mutably over element handles.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T::Ref> {
        self.items.iter_mut()
    }

    /// Append an element, moving it into a fresh mutable shape.
    pub fn push(&mut self, value: T) {
        self.items.push(value.thaw_owned());
    }

    /// Remove the last element, moving its storage out.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop().map(T::freeze_owned)
    }
}

impl<T: Mutable> MutRef for ElementsRef<T> {
    type Value = Elements<T>;
}

impl<T: Mutable> fmt::Debug for ElementsRef<T>
where
    T::Ref: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

fn log_resize(op: &'static str, from: usize, to: usize) {
    if from != to {
        tracing::debug!(op, from, to, "element container resized");
    }
}

impl<T: Mutable> Mutable for Elements<T> {
    type Ref = ElementsRef<T>;

    fn thaw(&self) -> ElementsRef<T> {
        ElementsRef {
            items: self.0.iter().map(T::thaw).collect(),
        }
    }

    fn thaw_owned(self) -> ElementsRef<T> {
        ElementsRef {
            items: self.0.into_iter().map(T::thaw_owned).collect(),
        }
    }

    fn freeze(r: &ElementsRef<T>) -> Self {
        Elements(r.items.iter().map(T::freeze).collect())
    }

    fn freeze_owned(r: ElementsRef<T>) -> Self {
        Elements(r.items.into_iter().map(T::freeze_owned).collect())
    }

    fn copy(r: &mut ElementsRef<T>, value: &Self) {
        let (old, new) = (r.items.len(), value.0.len());
        for (dst, v) in r.items.iter_mut().zip(&value.0) {
            T::copy(dst, v);
        }
        r.items.truncate(new);
        if new > old {
            r.items.extend(value.0[old..].iter().map(T::thaw));
        }
        log_resize("copy", old, new);
    }

    fn copy_owned(r: &mut ElementsRef<T>, value: Self) {
        let (old, new) = (r.items.len(), value.0.len());
        let mut values = value.0.into_iter();
        for dst in r.items.iter_mut() {
            match values.next() {
                Some(v) => T::copy_owned(dst, v),
                None => break,
            }
        }
        r.items.truncate(new);
        r.items.extend(values.map(T::thaw_owned));
        log_resize("copy", old, new);
    }

    fn move_ref(dst: &mut ElementsRef<T>, src: &ElementsRef<T>) {
        let (old, new) = (dst.items.len(), src.items.len());
        for (d, s) in dst.items.iter_mut().zip(&src.items) {
            T::move_ref(d, s);
        }
        dst.items.truncate(new);
        if new > old {
            dst.items.extend(src.items[old..].iter().map(T::clone_ref));
        }
        log_resize("move", old, new);
    }

    fn clone_ref(r: &ElementsRef<T>) -> ElementsRef<T> {
        ElementsRef {
            items: r.items.iter().map(T::clone_ref).collect(),
        }
    }
}

impl<T: Mutable> RefPath<ElementsRef<T>> for ElementAt {
    type Target = T::Ref;

    fn focus<'a>(&self, source: &'a ElementsRef<T>) -> PiecewiseResult<&'a T::Ref> {
        let len = source.len();
        source
            .get(self.0)
            .ok_or_else(|| PiecewiseError::index_out_of_bounds(self.0, len))
    }

    fn focus_mut<'a>(&self, source: &'a mut ElementsRef<T>) -> PiecewiseResult<&'a mut T::Ref> {
        let len = source.len();
        source
            .get_mut(self.0)
            .ok_or_else(|| PiecewiseError::index_out_of_bounds(self.0, len))
    }
}

// ============================================================================
// Fixed-size arrays
// ============================================================================

/// Mutable shape of `[T; N]`.
pub struct ArrayRef<T: Mutable, const N: usize>(pub [T::Ref; N]);

impl<T: Mutable, const N: usize> ArrayRef<T, N> {
    /// Borrow the handle of element `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T::Ref> {
        self.0.get(index)
    }

    /// Mutably borrow the handle of element `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T::Ref> {
        self.0.get_mut(index)
    }

    /// Iterate over element handles.
    pub fn iter(&self) -> std::slice::Iter<'_, T::Ref> {
        self.0.iter()
    }

    /// Iterate mutably over element handles.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T::Ref> {
        self.0.iter_mut()
    }
}

impl<T: Mutable, const N: usize> MutRef for ArrayRef<T, N> {
    type Value = [T; N];
}

impl<T: Mutable, const N: usize> fmt::Debug for ArrayRef<T, N>
where
    T::Ref: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T: Mutable, const N: usize> Mutable for [T; N] {
    type Ref = ArrayRef<T, N>;

    fn thaw(&self) -> ArrayRef<T, N> {
        ArrayRef(std::array::from_fn(|i| T::thaw(&self[i])))
    }

    fn thaw_owned(self) -> ArrayRef<T, N> {
        ArrayRef(self.map(T::thaw_owned))
    }

    fn freeze(r: &ArrayRef<T, N>) -> Self {
        std::array::from_fn(|i| T::freeze(&r.0[i]))
    }

    fn freeze_owned(r: ArrayRef<T, N>) -> Self {
        r.0.map(T::freeze_owned)
    }

    fn copy(r: &mut ArrayRef<T, N>, value: &Self) {
        for (dst, v) in r.0.iter_mut().zip(value) {
            T::copy(dst, v);
        }
    }

    fn copy_owned(r: &mut ArrayRef<T, N>, value: Self) {
        for (dst, v) in r.0.iter_mut().zip(value) {
            T::copy_owned(dst, v);
        }
    }

    fn move_ref(dst: &mut ArrayRef<T, N>, src: &ArrayRef<T, N>) {
        for (d, s) in dst.0.iter_mut().zip(&src.0) {
            T::move_ref(d, s);
        }
    }

    fn clone_ref(r: &ArrayRef<T, N>) -> ArrayRef<T, N> {
        ArrayRef(std::array::from_fn(|i| T::clone_ref(&r.0[i])))
    }
}

impl<T: Mutable, const N: usize> RefPath<ArrayRef<T, N>> for ElementAt {
    type Target = T::Ref;

    fn focus<'a>(&self, source: &'a ArrayRef<T, N>) -> PiecewiseResult<&'a T::Ref> {
        source
            .get(self.0)
            .ok_or_else(|| PiecewiseError::index_out_of_bounds(self.0, N))
    }

    fn focus_mut<'a>(&self, source: &'a mut ArrayRef<T, N>) -> PiecewiseResult<&'a mut T::Ref> {
        source
            .get_mut(self.0)
            .ok_or_else(|| PiecewiseError::index_out_of_bounds(self.0, N))
    }
}

/// Path to a statically known array element.
///
/// The index is checked against the array length when the path is
/// instantiated, so an out-of-range index fails to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayIndex<const I: usize>;

struct InBounds<const I: usize, const N: usize>;

impl<const I: usize, const N: usize> InBounds<I, N> {
    const CHECK: () = assert!(I < N, "ArrayIndex is past the end of the array");
}

crate::path::impl_then!(ArrayIndex<I> [const I: usize]);

impl<T: Mutable, const N: usize, const I: usize> RefPath<ArrayRef<T, N>> for ArrayIndex<I> {
    type Target = T::Ref;

    #[inline]
    fn focus<'a>(&self, source: &'a ArrayRef<T, N>) -> PiecewiseResult<&'a T::Ref> {
        Ok(self.get(source))
    }

    #[inline]
    fn focus_mut<'a>(&self, source: &'a mut ArrayRef<T, N>) -> PiecewiseResult<&'a mut T::Ref> {
        Ok(self.get_mut(source))
    }
}

impl<T: Mutable, const N: usize, const I: usize> TotalPath<ArrayRef<T, N>> for ArrayIndex<I> {
    #[inline]
    fn get<'a>(&self, source: &'a ArrayRef<T, N>) -> &'a T::Ref {
        let () = InBounds::<I, N>::CHECK;
        &source.0[I]
    }

    #[inline]
    fn get_mut<'a>(&self, source: &'a mut ArrayRef<T, N>) -> &'a mut T::Ref {
        let () = InBounds::<I, N>::CHECK;
        &mut source.0[I]
    }
}
