//! Structural representation engine.
//!
//! A type implementing [`Generic`] describes its shape as a tree of
//! representation nodes:
//!
//! | node             | meaning                         | mutable shape                  |
//! |------------------|---------------------------------|--------------------------------|
//! | `Leaf<C>`        | one component of type `C`       | `C::Ref`                       |
//! | `Unit`           | no data                         | `Unit`                         |
//! | `Void`           | uninhabited                     | `Void`                         |
//! | `Product<F, G>`  | both `F` and `G`                | `Product<F::GRef, G::GRef>`    |
//! | `Sum<F, G>`      | either `F` or `G`               | `Choice<F::GRef, G::GRef>`     |
//! | `Labeled<M, F>`  | field/variant metadata around F | `Labeled<M, F::GRef>`          |
//!
//! [`GMutable`] is implemented once per node, so every `Generic` type gets a
//! piecewise mutable shape ([`GRef`]) by recursive descent over its
//! representation. `#[derive(Mutable)]` with `#[piecewise(generic)]` emits the
//! `Generic` impl; the crate uses the same route for `Option` and `Result`.

use crate::{Mutable, MutRef, PiecewiseError, PiecewiseResult, RefPath, TotalPath};
use std::fmt;
use std::marker::PhantomData;

/// A type with a structural representation.
pub trait Generic: Sized {
    /// The representation tree.
    type Rep: GMutable;

    /// Name of the type, used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Field names in declaration order (all variants, flattened).
    const FIELDS: &'static [&'static str] = &[];

    /// Variant names in declaration order (empty for structs).
    const VARIANTS: &'static [&'static str] = &[];

    /// Convert the value into its representation.
    fn into_rep(self) -> Self::Rep;

    /// Rebuild the value from its representation.
    fn from_rep(rep: Self::Rep) -> Self;
}

/// Mutable-shape derivation for one representation node.
pub trait GMutable: Sized {
    /// The mutable shape of this node.
    type GRef;

    /// Thaw by moving the node's storage into fresh cells.
    fn gthaw(self) -> Self::GRef;

    /// Read a snapshot of the node.
    fn gfreeze(r: &Self::GRef) -> Self;

    /// Consume the mutable shape, moving storage out.
    fn gfreeze_owned(r: Self::GRef) -> Self;

    /// Overwrite the mutable shape with `value`.
    fn gcopy(r: &mut Self::GRef, value: Self);

    /// Copy `src` into `dst`.
    fn gmove(dst: &mut Self::GRef, src: &Self::GRef);

    /// Allocate an independent copy.
    fn gclone(r: &Self::GRef) -> Self::GRef;
}

// ============================================================================
// Representation nodes
// ============================================================================

/// One component, delegated to its own `Mutable` registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Leaf<C>(pub C);

/// A node with no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unit;

/// An uninhabited node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Void {}

impl Void {
    /// Eliminate an impossible value.
    pub fn absurd<T>(self) -> T {
        match self {}
    }
}

/// Both substructures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Product<F, G>(pub F, pub G);

/// One of two substructures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sum<F, G> {
    /// The first alternative.
    Left(F),
    /// The second alternative.
    Right(G),
}

impl<F, G> Sum<F, G> {
    /// Returns `"left"` or `"right"`.
    pub fn side(&self) -> &'static str {
        match self {
            Sum::Left(_) => "left",
            Sum::Right(_) => "right",
        }
    }
}

/// Metadata wrapper naming a field or variant.
pub struct Labeled<M, F> {
    /// The wrapped node.
    pub inner: F,
    label: PhantomData<fn() -> M>,
}

impl<M, F> Labeled<M, F> {
    /// Wrap a node.
    #[inline]
    pub const fn new(inner: F) -> Self {
        Self {
            inner,
            label: PhantomData,
        }
    }

    /// Unwrap the node.
    #[inline]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<M: Label, F> Labeled<M, F> {
    /// The label text.
    pub fn label(&self) -> &'static str {
        M::label()
    }
}

impl<M, F: Clone> Clone for Labeled<M, F> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<M, F: PartialEq> PartialEq for Labeled<M, F> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<M, F: fmt::Debug> fmt::Debug for Labeled<M, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Labeled").field(&self.inner).finish()
    }
}

/// Compile-time label text for a `Labeled` node.
pub trait Label {
    /// The label text.
    fn label() -> &'static str;

    /// Name of the type the label belongs to.
    fn type_name() -> &'static str;
}

/// Label for field `I` of `T` (index into `T::FIELDS`).
pub struct Field<T, const I: usize>(PhantomData<fn() -> T>);

/// Label for variant `I` of `T` (index into `T::VARIANTS`).
pub struct Variant<T, const I: usize>(PhantomData<fn() -> T>);

impl<T: Generic, const I: usize> Label for Field<T, I> {
    fn label() -> &'static str {
        T::FIELDS.get(I).copied().unwrap_or("?")
    }

    fn type_name() -> &'static str {
        T::TYPE_NAME
    }
}

impl<T: Generic, const I: usize> Label for Variant<T, I> {
    fn label() -> &'static str {
        T::VARIANTS.get(I).copied().unwrap_or("?")
    }

    fn type_name() -> &'static str {
        T::TYPE_NAME
    }
}

/// Variant naming for the alternatives of a `Choice`, used when a path
/// targets an alternative that is not active.
pub trait Alternative {
    /// Name of the sum type.
    fn type_name() -> &'static str;

    /// Name of the first variant this alternative can hold.
    fn first_variant() -> &'static str;

    /// Name of the variant this alternative holds.
    fn active_variant(&self) -> &'static str;
}

impl<M: Label, F> Alternative for Labeled<M, F> {
    fn type_name() -> &'static str {
        M::type_name()
    }

    fn first_variant() -> &'static str {
        M::label()
    }

    fn active_variant(&self) -> &'static str {
        M::label()
    }
}

impl<F: Alternative, G: Alternative> Alternative for Choice<F, G> {
    fn type_name() -> &'static str {
        F::type_name()
    }

    fn first_variant() -> &'static str {
        F::first_variant()
    }

    fn active_variant(&self) -> &'static str {
        match self.active() {
            Sum::Left(f) => f.active_variant(),
            Sum::Right(g) => g.active_variant(),
        }
    }
}

/// The mutable shape of a sum: a boxed, re-assignable slot holding the
/// mutable shape of whichever alternative is active.
///
/// Tag and payload always change together: switching alternatives replaces
/// the slot contents in one assignment.
pub struct Choice<F, G> {
    slot: Box<Sum<F, G>>,
}

impl<F, G> Choice<F, G> {
    /// Create a slot holding `active`.
    #[inline]
    pub fn new(active: Sum<F, G>) -> Self {
        Self {
            slot: Box::new(active),
        }
    }

    /// The active alternative.
    #[inline]
    pub fn active(&self) -> &Sum<F, G> {
        &self.slot
    }

    /// The active alternative, mutably.
    #[inline]
    pub fn active_mut(&mut self) -> &mut Sum<F, G> {
        &mut self.slot
    }

    /// Replace the active alternative, returning the previous one.
    pub fn replace(&mut self, active: Sum<F, G>) -> Sum<F, G> {
        let previous = std::mem::replace(&mut *self.slot, active);
        tracing::trace!(
            from = previous.side(),
            to = self.slot.side(),
            "choice slot replaced"
        );
        previous
    }

    /// Returns true while the first alternative is active.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(*self.slot, Sum::Left(_))
    }

    /// Returns true while the second alternative is active.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(*self.slot, Sum::Right(_))
    }

    /// The first alternative, if active.
    pub fn left(&self) -> Option<&F> {
        match &*self.slot {
            Sum::Left(f) => Some(f),
            Sum::Right(_) => None,
        }
    }

    /// The first alternative, mutably, if active.
    pub fn left_mut(&mut self) -> Option<&mut F> {
        match &mut *self.slot {
            Sum::Left(f) => Some(f),
            Sum::Right(_) => None,
        }
    }

    /// The second alternative, if active.
    pub fn right(&self) -> Option<&G> {
        match &*self.slot {
            Sum::Left(_) => None,
            Sum::Right(g) => Some(g),
        }
    }

    /// The second alternative, mutably, if active.
    pub fn right_mut(&mut self) -> Option<&mut G> {
        match &mut *self.slot {
            Sum::Left(_) => None,
            Sum::Right(g) => Some(g),
        }
    }

    /// Consume the slot and return the active alternative.
    pub fn into_active(self) -> Sum<F, G> {
        *self.slot
    }
}

impl<F: fmt::Debug, G: fmt::Debug> fmt::Debug for Choice<F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Choice").field(&self.slot).finish()
    }
}

// ============================================================================
// GMutable per node
// ============================================================================

impl<C: Mutable> GMutable for Leaf<C> {
    type GRef = C::Ref;

    #[inline]
    fn gthaw(self) -> C::Ref {
        C::thaw_owned(self.0)
    }

    #[inline]
    fn gfreeze(r: &C::Ref) -> Self {
        Leaf(C::freeze(r))
    }

    #[inline]
    fn gfreeze_owned(r: C::Ref) -> Self {
        Leaf(C::freeze_owned(r))
    }

    #[inline]
    fn gcopy(r: &mut C::Ref, value: Self) {
        C::copy_owned(r, value.0)
    }

    #[inline]
    fn gmove(dst: &mut C::Ref, src: &C::Ref) {
        C::move_ref(dst, src)
    }

    #[inline]
    fn gclone(r: &C::Ref) -> C::Ref {
        C::clone_ref(r)
    }
}

impl GMutable for Unit {
    type GRef = Unit;

    #[inline]
    fn gthaw(self) -> Unit {
        Unit
    }

    #[inline]
    fn gfreeze(_: &Unit) -> Self {
        Unit
    }

    #[inline]
    fn gfreeze_owned(_: Unit) -> Self {
        Unit
    }

    #[inline]
    fn gcopy(_: &mut Unit, _: Self) {}

    #[inline]
    fn gmove(_: &mut Unit, _: &Unit) {}

    #[inline]
    fn gclone(_: &Unit) -> Unit {
        Unit
    }
}

impl GMutable for Void {
    type GRef = Void;

    fn gthaw(self) -> Void {
        match self {}
    }

    fn gfreeze(r: &Void) -> Self {
        match *r {}
    }

    fn gfreeze_owned(r: Void) -> Self {
        match r {}
    }

    fn gcopy(_: &mut Void, value: Self) {
        match value {}
    }

    fn gmove(_: &mut Void, src: &Void) {
        match *src {}
    }

    fn gclone(r: &Void) -> Void {
        match *r {}
    }
}

impl<F: GMutable, G: GMutable> GMutable for Product<F, G> {
    type GRef = Product<F::GRef, G::GRef>;

    #[inline]
    fn gthaw(self) -> Self::GRef {
        Product(self.0.gthaw(), self.1.gthaw())
    }

    #[inline]
    fn gfreeze(r: &Self::GRef) -> Self {
        Product(F::gfreeze(&r.0), G::gfreeze(&r.1))
    }

    #[inline]
    fn gfreeze_owned(r: Self::GRef) -> Self {
        Product(F::gfreeze_owned(r.0), G::gfreeze_owned(r.1))
    }

    #[inline]
    fn gcopy(r: &mut Self::GRef, value: Self) {
        F::gcopy(&mut r.0, value.0);
        G::gcopy(&mut r.1, value.1);
    }

    #[inline]
    fn gmove(dst: &mut Self::GRef, src: &Self::GRef) {
        F::gmove(&mut dst.0, &src.0);
        G::gmove(&mut dst.1, &src.1);
    }

    #[inline]
    fn gclone(r: &Self::GRef) -> Self::GRef {
        Product(F::gclone(&r.0), G::gclone(&r.1))
    }
}

impl<F: GMutable, G: GMutable> GMutable for Sum<F, G> {
    type GRef = Choice<F::GRef, G::GRef>;

    fn gthaw(self) -> Self::GRef {
        Choice::new(match self {
            Sum::Left(f) => Sum::Left(f.gthaw()),
            Sum::Right(g) => Sum::Right(g.gthaw()),
        })
    }

    fn gfreeze(r: &Self::GRef) -> Self {
        match r.active() {
            Sum::Left(f) => Sum::Left(F::gfreeze(f)),
            Sum::Right(g) => Sum::Right(G::gfreeze(g)),
        }
    }

    fn gfreeze_owned(r: Self::GRef) -> Self {
        match r.into_active() {
            Sum::Left(f) => Sum::Left(F::gfreeze_owned(f)),
            Sum::Right(g) => Sum::Right(G::gfreeze_owned(g)),
        }
    }

    fn gcopy(r: &mut Self::GRef, value: Self) {
        let fresh = match (r.active_mut(), value) {
            (Sum::Left(dst), Sum::Left(f)) => return F::gcopy(dst, f),
            (Sum::Right(dst), Sum::Right(g)) => return G::gcopy(dst, g),
            (_, Sum::Left(f)) => Sum::Left(f.gthaw()),
            (_, Sum::Right(g)) => Sum::Right(g.gthaw()),
        };
        r.replace(fresh);
    }

    fn gmove(dst: &mut Self::GRef, src: &Self::GRef) {
        let fresh = match (dst.active_mut(), src.active()) {
            (Sum::Left(d), Sum::Left(s)) => return F::gmove(d, s),
            (Sum::Right(d), Sum::Right(s)) => return G::gmove(d, s),
            (_, Sum::Left(s)) => Sum::Left(F::gclone(s)),
            (_, Sum::Right(s)) => Sum::Right(G::gclone(s)),
        };
        dst.replace(fresh);
    }

    fn gclone(r: &Self::GRef) -> Self::GRef {
        Choice::new(match r.active() {
            Sum::Left(f) => Sum::Left(F::gclone(f)),
            Sum::Right(g) => Sum::Right(G::gclone(g)),
        })
    }
}

impl<M, F: GMutable> GMutable for Labeled<M, F> {
    type GRef = Labeled<M, F::GRef>;

    #[inline]
    fn gthaw(self) -> Self::GRef {
        Labeled::new(self.inner.gthaw())
    }

    #[inline]
    fn gfreeze(r: &Self::GRef) -> Self {
        Labeled::new(F::gfreeze(&r.inner))
    }

    #[inline]
    fn gfreeze_owned(r: Self::GRef) -> Self {
        Labeled::new(F::gfreeze_owned(r.inner))
    }

    #[inline]
    fn gcopy(r: &mut Self::GRef, value: Self) {
        F::gcopy(&mut r.inner, value.inner)
    }

    #[inline]
    fn gmove(dst: &mut Self::GRef, src: &Self::GRef) {
        F::gmove(&mut dst.inner, &src.inner)
    }

    #[inline]
    fn gclone(r: &Self::GRef) -> Self::GRef {
        Labeled::new(F::gclone(&r.inner))
    }
}

// ============================================================================
// Whole-value mutable shape
// ============================================================================

/// The mutable shape of a `Generic` type, derived from its representation.
pub struct GRef<T: Generic> {
    rep: <T::Rep as GMutable>::GRef,
}

impl<T: Generic> GRef<T> {
    /// The mutable shape of the representation.
    #[inline]
    pub fn rep(&self) -> &<T::Rep as GMutable>::GRef {
        &self.rep
    }

    /// The mutable shape of the representation, mutably.
    #[inline]
    pub fn rep_mut(&mut self) -> &mut <T::Rep as GMutable>::GRef {
        &mut self.rep
    }
}

impl<T> MutRef for GRef<T>
where
    T: Generic + Mutable<Ref = GRef<T>>,
{
    type Value = T;
}

impl<T: Generic> fmt::Debug for GRef<T>
where
    <T::Rep as GMutable>::GRef: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GRef")
            .field("type", &T::TYPE_NAME)
            .field("rep", &self.rep)
            .finish()
    }
}

/// Thaw a value through its representation, moving its storage.
#[inline]
pub fn thaw<T: Generic>(value: T) -> GRef<T> {
    GRef {
        rep: value.into_rep().gthaw(),
    }
}

/// Read a snapshot of a generic mutable shape.
#[inline]
pub fn freeze<T: Generic>(r: &GRef<T>) -> T {
    T::from_rep(T::Rep::gfreeze(&r.rep))
}

/// Consume a generic mutable shape, moving its storage out.
#[inline]
pub fn freeze_owned<T: Generic>(r: GRef<T>) -> T {
    T::from_rep(T::Rep::gfreeze_owned(r.rep))
}

/// Overwrite a generic mutable shape with `value`.
#[inline]
pub fn copy<T: Generic>(r: &mut GRef<T>, value: T) {
    T::Rep::gcopy(&mut r.rep, value.into_rep())
}

/// Copy `src` into `dst`.
#[inline]
pub fn move_ref<T: Generic>(dst: &mut GRef<T>, src: &GRef<T>) {
    T::Rep::gmove(&mut dst.rep, &src.rep)
}

/// Allocate an independent copy of a generic mutable shape.
#[inline]
pub fn clone_ref<T: Generic>(r: &GRef<T>) -> GRef<T> {
    GRef {
        rep: T::Rep::gclone(&r.rep),
    }
}

// ============================================================================
// Representation paths
// ============================================================================

/// Path from `GRef<T>` to the mutable shape of its representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepRoot;

/// Path from a product to its first component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductFirst;

/// Path from a product to its second component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductSecond;

/// Path through a label to the wrapped node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unlabel;

/// Path into the first alternative of a choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChoiceLeft;

/// Path into the second alternative of a choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChoiceRight;

crate::path::impl_then!(RepRoot, ProductFirst, ProductSecond, Unlabel, ChoiceLeft, ChoiceRight);

macro_rules! total_rep_path {
    ($path:ty, [$($gen:tt)*], $source:ty => $target:ty, |$s:ident| $get:expr, |$m:ident| $get_mut:expr) => {
        impl<$($gen)*> RefPath<$source> for $path {
            type Target = $target;

            #[inline]
            fn focus<'a>(&self, source: &'a $source) -> PiecewiseResult<&'a $target> {
                Ok(self.get(source))
            }

            #[inline]
            fn focus_mut<'a>(&self, source: &'a mut $source) -> PiecewiseResult<&'a mut $target> {
                Ok(self.get_mut(source))
            }
        }

        impl<$($gen)*> TotalPath<$source> for $path {
            #[inline]
            fn get<'a>(&self, $s: &'a $source) -> &'a $target {
                $get
            }

            #[inline]
            fn get_mut<'a>(&self, $m: &'a mut $source) -> &'a mut $target {
                $get_mut
            }
        }
    };
}

total_rep_path!(RepRoot, [T: Generic], GRef<T> => <T::Rep as GMutable>::GRef, |s| &s.rep, |s| &mut s.rep);
total_rep_path!(ProductFirst, [F, G], Product<F, G> => F, |s| &s.0, |s| &mut s.0);
total_rep_path!(ProductSecond, [F, G], Product<F, G> => G, |s| &s.1, |s| &mut s.1);
total_rep_path!(Unlabel, [M, F], Labeled<M, F> => F, |s| &s.inner, |s| &mut s.inner);

impl<F: Alternative, G: Alternative> RefPath<Choice<F, G>> for ChoiceLeft {
    type Target = F;

    fn focus<'a>(&self, source: &'a Choice<F, G>) -> PiecewiseResult<&'a F> {
        source.left().ok_or_else(|| {
            PiecewiseError::inactive_branch(
                F::type_name(),
                F::first_variant(),
                source.active_variant(),
            )
        })
    }

    fn focus_mut<'a>(&self, source: &'a mut Choice<F, G>) -> PiecewiseResult<&'a mut F> {
        let active = source.active_variant();
        source
            .left_mut()
            .ok_or_else(|| PiecewiseError::inactive_branch(F::type_name(), F::first_variant(), active))
    }
}

impl<F: Alternative, G: Alternative> RefPath<Choice<F, G>> for ChoiceRight {
    type Target = G;

    fn focus<'a>(&self, source: &'a Choice<F, G>) -> PiecewiseResult<&'a G> {
        source.right().ok_or_else(|| {
            PiecewiseError::inactive_branch(
                F::type_name(),
                G::first_variant(),
                source.active_variant(),
            )
        })
    }

    fn focus_mut<'a>(&self, source: &'a mut Choice<F, G>) -> PiecewiseResult<&'a mut G> {
        let active = source.active_variant();
        source
            .right_mut()
            .ok_or_else(|| PiecewiseError::inactive_branch(F::type_name(), G::first_variant(), active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MutCell, RefExt};

    type PairRep = Product<Labeled<Field<Pair, 0>, Leaf<i64>>, Labeled<Field<Pair, 1>, Leaf<String>>>;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        id: i64,
        name: String,
    }

    impl Generic for Pair {
        type Rep = PairRep;

        const TYPE_NAME: &'static str = "Pair";
        const FIELDS: &'static [&'static str] = &["id", "name"];

        fn into_rep(self) -> PairRep {
            Product(Labeled::new(Leaf(self.id)), Labeled::new(Leaf(self.name)))
        }

        fn from_rep(rep: PairRep) -> Self {
            let Product(id, name) = rep;
            Pair {
                id: id.inner.0,
                name: name.inner.0,
            }
        }
    }

    #[test]
    fn test_product_round_trip() {
        let value = Pair {
            id: 7,
            name: "seven".into(),
        };
        let r = thaw(value.clone());
        assert_eq!(freeze(&r), value);
        assert_eq!(freeze_owned(r), value);
    }

    #[test]
    fn test_product_sides_are_independent_cells() {
        let mut r = thaw(Pair {
            id: 1,
            name: "one".into(),
        });

        let id_path = RepRoot.then(ProductFirst).then(Unlabel);
        let id_cell: &mut MutCell<i64> = id_path.get_mut(&mut r);
        id_cell.set(2);

        let name_path = RepRoot.then(ProductSecond).then(Unlabel);
        assert_eq!(name_path.get(&r).get(), "one");
        assert_eq!(freeze(&r).id, 2);
    }

    #[test]
    fn test_labels_resolve_names() {
        assert_eq!(<Field<Pair, 0> as Label>::label(), "id");
        assert_eq!(<Field<Pair, 1> as Label>::label(), "name");
        assert_eq!(<Field<Pair, 9> as Label>::label(), "?");

        let r = thaw(Pair {
            id: 0,
            name: String::new(),
        });
        assert_eq!(r.rep().0.label(), "id");
    }

    #[test]
    fn test_sum_copy_same_side_keeps_slot() {
        let mut r = Sum::<Leaf<i64>, Leaf<bool>>::Left(Leaf(3)).gthaw();
        let before: *const MutCell<i64> = r.left().unwrap();

        Sum::<Leaf<i64>, Leaf<bool>>::gcopy(&mut r, Sum::Left(Leaf(4)));

        let after: *const MutCell<i64> = r.left().unwrap();
        assert_eq!(before, after);
        assert_eq!(r.left().unwrap().freeze(), 4);
    }

    #[test]
    fn test_sum_copy_other_side_switches_tag() {
        let mut r = Sum::<Leaf<i64>, Leaf<bool>>::Left(Leaf(3)).gthaw();

        Sum::<Leaf<i64>, Leaf<bool>>::gcopy(&mut r, Sum::Right(Leaf(true)));

        assert!(r.is_right());
        assert!(r.left().is_none());
        assert_eq!(
            Sum::<Leaf<i64>, Leaf<bool>>::gfreeze(&r),
            Sum::Right(Leaf(true))
        );
    }

    #[test]
    fn test_sum_move_across_tags_clones_source() {
        let src = Sum::<Leaf<i64>, Leaf<bool>>::Right(Leaf(false)).gthaw();
        let mut dst = Sum::<Leaf<i64>, Leaf<bool>>::Left(Leaf(10)).gthaw();

        Sum::<Leaf<i64>, Leaf<bool>>::gmove(&mut dst, &src);
        assert_eq!(dst.right().unwrap().freeze(), false);

        dst.right_mut().unwrap().set(true);
        assert_eq!(src.right().unwrap().freeze(), false);
    }

    #[test]
    fn test_choice_paths_name_variants() {
        let mut r = thaw(Some(5_i64));
        let some = RepRoot.then(ChoiceRight).then(Unlabel).then(Unlabel);
        assert_eq!(some.focus(&r).unwrap().freeze(), 5);
        assert!(RepRoot.then(ChoiceLeft).focus(&r).is_err());

        copy(&mut r, None);
        let err = RepRoot.then(ChoiceRight).focus_mut(&mut r).unwrap_err();
        assert_eq!(err, PiecewiseError::inactive_branch("Option", "Some", "None"));
        assert_eq!(
            err.to_string(),
            "Option: path targets variant `Some` but `None` is active"
        );
    }

    #[test]
    fn test_unit_and_void() {
        let r = Unit.gthaw();
        assert_eq!(Unit::gfreeze(&r), Unit);
        assert_eq!(Unit::gclone(&r), Unit);

        let never: Option<Void> = None;
        assert!(never.map(Void::absurd::<i32>).is_none());
    }
}
