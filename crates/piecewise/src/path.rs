//! Reference paths: typed accessors from a mutable shape to one component.
//!
//! A path never scans or looks anything up by name at runtime. Field paths
//! are plain field projections; only paths that enter a sum variant or a
//! traversal element check anything, and those report a `PiecewiseError`
//! when the component is not present.
//!
//! Paths compose with `then` (or [`compose`]) and form a category with
//! [`Id`] as identity. Composition is checked when the composed path is
//! focused, so `then` itself never needs to know the source type.

use crate::{Mutable, PiecewiseResult};
use std::fmt;
use std::marker::PhantomData;

/// A path from a mutable shape `S` to one of its components.
pub trait RefPath<S> {
    /// The component the path points at.
    type Target;

    /// Borrow the component.
    fn focus<'a>(&self, source: &'a S) -> PiecewiseResult<&'a Self::Target>;

    /// Mutably borrow the component.
    fn focus_mut<'a>(&self, source: &'a mut S) -> PiecewiseResult<&'a mut Self::Target>;
}

/// A path that always reaches its target (products and identities only).
pub trait TotalPath<S>: RefPath<S> {
    /// Borrow the component.
    fn get<'a>(&self, source: &'a S) -> &'a Self::Target;

    /// Mutably borrow the component.
    fn get_mut<'a>(&self, source: &'a mut S) -> &'a mut Self::Target;
}

/// Compose two paths: `outer` first, then `inner`.
#[inline]
pub fn compose<P, Q>(outer: P, inner: Q) -> Compose<P, Q> {
    Compose::new(outer, inner)
}

/// Adds an inherent `then` to path types.
macro_rules! impl_then {
    ($($name:ident $(<$($gen:tt),+>)? $([$($bound:tt)*])?),+ $(,)?) => {
        $(
            impl<$($($bound)*)?> $name $(<$($gen),+>)? {
                /// Continue the path into a component of its target.
                #[inline]
                pub fn then<Next>(self, next: Next) -> $crate::path::Compose<Self, Next> {
                    $crate::path::Compose::new(self, next)
                }
            }
        )+
    };
}

pub(crate) use impl_then;

// ============================================================================
// Identity and composition
// ============================================================================

/// The identity path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Id;

impl<S> RefPath<S> for Id {
    type Target = S;

    #[inline]
    fn focus<'a>(&self, source: &'a S) -> PiecewiseResult<&'a S> {
        Ok(source)
    }

    #[inline]
    fn focus_mut<'a>(&self, source: &'a mut S) -> PiecewiseResult<&'a mut S> {
        Ok(source)
    }
}

impl<S> TotalPath<S> for Id {
    #[inline]
    fn get<'a>(&self, source: &'a S) -> &'a S {
        source
    }

    #[inline]
    fn get_mut<'a>(&self, source: &'a mut S) -> &'a mut S {
        source
    }
}

/// Two paths applied one after the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compose<P, Q> {
    outer: P,
    inner: Q,
}

impl<P, Q> Compose<P, Q> {
    /// Create a composed path.
    #[inline]
    pub const fn new(outer: P, inner: Q) -> Self {
        Self { outer, inner }
    }

    /// The first path applied.
    pub fn outer(&self) -> &P {
        &self.outer
    }

    /// The second path applied.
    pub fn inner(&self) -> &Q {
        &self.inner
    }
}

// Paths are zero-sized markers; `'static` lets the intermediate target
// outlive every borrow of the source.
impl<S, P, Q> RefPath<S> for Compose<P, Q>
where
    P: RefPath<S> + 'static,
    Q: RefPath<P::Target>,
{
    type Target = Q::Target;

    #[inline]
    fn focus<'a>(&self, source: &'a S) -> PiecewiseResult<&'a Self::Target> {
        let mid = self.outer.focus(source)?;
        self.inner.focus(mid)
    }

    #[inline]
    fn focus_mut<'a>(&self, source: &'a mut S) -> PiecewiseResult<&'a mut Self::Target> {
        let mid = self.outer.focus_mut(source)?;
        self.inner.focus_mut(mid)
    }
}

impl<S, P, Q> TotalPath<S> for Compose<P, Q>
where
    P: TotalPath<S> + 'static,
    Q: TotalPath<P::Target>,
{
    #[inline]
    fn get<'a>(&self, source: &'a S) -> &'a Self::Target {
        self.inner.get(self.outer.get(source))
    }

    #[inline]
    fn get_mut<'a>(&self, source: &'a mut S) -> &'a mut Self::Target {
        self.inner.get_mut(self.outer.get_mut(source))
    }
}

impl_then!(
    Id,
    Compose<P, Q> [P, Q],
);

// ============================================================================
// Positional paths
// ============================================================================

/// Path to the field at position `I` of `T`'s mutable shape.
///
/// `#[derive(Mutable)]` implements it for every field of a struct and the
/// crate implements it for tuples, so fields can be addressed by position:
/// `FieldPath::<(i32, bool), 1>::new()`.
pub struct FieldPath<T, const I: usize>(PhantomData<fn() -> T>);

impl<T, const I: usize> FieldPath<T, I> {
    /// Create the path.
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// The field position.
    pub const fn index(&self) -> usize {
        I
    }
}

/// Path to field `I` of variant `V` of an enum's mutable shape.
///
/// Focusing fails with `PiecewiseError::InactiveBranch` while another
/// variant is active.
pub struct VariantPath<T, const V: usize, const I: usize>(PhantomData<fn() -> T>);

impl<T, const V: usize, const I: usize> VariantPath<T, V, I> {
    /// Create the path.
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// The variant position.
    pub const fn variant(&self) -> usize {
        V
    }

    /// The field position within the variant.
    pub const fn index(&self) -> usize {
        I
    }
}

macro_rules! marker_path_impls {
    ($name:ident < $($c:ident),+ >) => {
        impl<T, $(const $c: usize),+> Clone for $name<T, $($c),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T, $(const $c: usize),+> Copy for $name<T, $($c),+> {}

        impl<T, $(const $c: usize),+> Default for $name<T, $($c),+> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T, $(const $c: usize),+> fmt::Debug for $name<T, $($c),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    $(.field(&$c))+
                    .finish()
            }
        }
    };
}

marker_path_impls!(FieldPath<I>);
marker_path_impls!(VariantPath<V, I>);

impl_then!(
    FieldPath<T, I> [T, const I: usize],
    VariantPath<T, V, I> [T, const V: usize, const I: usize],
);

/// Path to element `n` of a traversal container or array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementAt(pub usize);

impl_then!(ElementAt);

// ============================================================================
// First-matching-type paths
// ============================================================================

/// Opt-in lookup of the first field of type `F`.
///
/// Implemented by `#[derive(Mutable)]` under `#[piecewise(by_type)]`. The
/// lookup is syntactic: it follows declaration order, so reordering fields or
/// adding a second field of the same type silently changes which field it
/// resolves to. Prefer named or positional paths.
pub trait ByType<F>: Mutable {
    /// The path to the first field of type `F`.
    type Path: TotalPath<Self::Ref> + Default;
}

/// Path to the first field of type `F` in `T`.
#[inline]
pub fn by_type<T, F>() -> T::Path
where
    T: ByType<F>,
{
    T::Path::default()
}
