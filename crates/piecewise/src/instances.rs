//! `Mutable` registrations for standard library types.

use crate::generic::{self, Field, GRef, Generic, Labeled, Leaf, Sum, Unit, Variant};
use crate::{leaf_mutable, Decompose, FieldPath, MutCell, MutRef, Mutable, PiecewiseResult};
use crate::{RefPath, TotalPath};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::convert::Infallible;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// Leaves
// ============================================================================

leaf_mutable!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str
);

/// The leaf operations, for impls that need their own generic header.
macro_rules! leaf_ops {
    () => {
        type Ref = MutCell<Self>;

        #[inline]
        fn thaw(&self) -> Self::Ref {
            crate::leaf::thaw(self)
        }

        #[inline]
        fn thaw_owned(self) -> Self::Ref {
            crate::leaf::thaw_owned(self)
        }

        #[inline]
        fn freeze(r: &Self::Ref) -> Self {
            crate::leaf::freeze(r)
        }

        #[inline]
        fn freeze_owned(r: Self::Ref) -> Self {
            crate::leaf::freeze_owned(r)
        }

        #[inline]
        fn copy(r: &mut Self::Ref, value: &Self) {
            crate::leaf::copy(r, value)
        }

        #[inline]
        fn copy_owned(r: &mut Self::Ref, value: Self) {
            crate::leaf::copy_owned(r, value)
        }

        #[inline]
        fn move_ref(dst: &mut Self::Ref, src: &Self::Ref) {
            crate::leaf::move_ref(dst, src)
        }

        #[inline]
        fn clone_ref(r: &Self::Ref) -> Self::Ref {
            crate::leaf::clone_ref(r)
        }
    };
}

impl<T: Clone> Mutable for Vec<T> {
    leaf_ops!();
}

impl<T: Clone> Mutable for VecDeque<T> {
    leaf_ops!();
}

impl<T: Clone> Mutable for BTreeSet<T> {
    leaf_ops!();
}

impl<K: Clone, V: Clone> Mutable for BTreeMap<K, V> {
    leaf_ops!();
}

impl<T: Clone + Eq + Hash, S: Clone + BuildHasher> Mutable for HashSet<T, S> {
    leaf_ops!();
}

impl<K: Clone + Eq + Hash, V: Clone, S: Clone + BuildHasher> Mutable for HashMap<K, V, S> {
    leaf_ops!();
}

impl<T: Clone> Mutable for Box<T> {
    leaf_ops!();
}

impl<T: ?Sized> Mutable for Rc<T> {
    leaf_ops!();
}

impl<T: ?Sized> Mutable for Arc<T> {
    leaf_ops!();
}

// ============================================================================
// Empty shapes
// ============================================================================

impl MutRef for () {
    type Value = ();
}

impl Mutable for () {
    type Ref = ();

    #[inline]
    fn thaw(&self) {}

    #[inline]
    fn freeze(_: &()) {}

    #[inline]
    fn copy(_: &mut (), _: &()) {}

    #[inline]
    fn move_ref(_: &mut (), _: &()) {}

    #[inline]
    fn clone_ref(_: &()) {}
}

impl<T: ?Sized> MutRef for PhantomData<T> {
    type Value = PhantomData<T>;
}

impl<T: ?Sized> Mutable for PhantomData<T> {
    type Ref = PhantomData<T>;

    #[inline]
    fn thaw(&self) -> PhantomData<T> {
        PhantomData
    }

    #[inline]
    fn freeze(_: &PhantomData<T>) -> Self {
        PhantomData
    }

    #[inline]
    fn copy(_: &mut PhantomData<T>, _: &Self) {}

    #[inline]
    fn move_ref(_: &mut PhantomData<T>, _: &PhantomData<T>) {}

    #[inline]
    fn clone_ref(_: &PhantomData<T>) -> PhantomData<T> {
        PhantomData
    }
}

impl MutRef for Infallible {
    type Value = Infallible;
}

impl Mutable for Infallible {
    type Ref = Infallible;

    fn thaw(&self) -> Infallible {
        match *self {}
    }

    fn thaw_owned(self) -> Infallible {
        match self {}
    }

    fn freeze(r: &Infallible) -> Self {
        match *r {}
    }

    fn freeze_owned(r: Infallible) -> Self {
        match r {}
    }

    fn copy(_: &mut Infallible, value: &Self) {
        match *value {}
    }

    fn copy_owned(_: &mut Infallible, value: Self) {
        match value {}
    }

    fn move_ref(_: &mut Infallible, src: &Infallible) {
        match *src {}
    }

    fn clone_ref(r: &Infallible) -> Infallible {
        match *r {}
    }
}

// ============================================================================
// Tuples
// ============================================================================

macro_rules! tuple_field_path {
    ([$($g:ident),+] $name:ident; $t:ident . $idx:tt) => {
        impl<$($g: Mutable),+> RefPath<$name<$($g),+>> for FieldPath<($($g,)+), $idx> {
            type Target = <$t as Mutable>::Ref;

            #[inline]
            fn focus<'a>(&self, source: &'a $name<$($g),+>) -> PiecewiseResult<&'a Self::Target> {
                Ok(&source.$idx)
            }

            #[inline]
            fn focus_mut<'a>(
                &self,
                source: &'a mut $name<$($g),+>,
            ) -> PiecewiseResult<&'a mut Self::Target> {
                Ok(&mut source.$idx)
            }
        }

        impl<$($g: Mutable),+> TotalPath<$name<$($g),+>> for FieldPath<($($g,)+), $idx> {
            #[inline]
            fn get<'a>(&self, source: &'a $name<$($g),+>) -> &'a Self::Target {
                &source.$idx
            }

            #[inline]
            fn get_mut<'a>(&self, source: &'a mut $name<$($g),+>) -> &'a mut Self::Target {
                &mut source.$idx
            }
        }
    };
}

macro_rules! tuple_field_paths {
    ($gens:tt $name:ident; $($t:ident . $idx:tt),+) => {
        $(tuple_field_path!($gens $name; $t . $idx);)+
    };
}

macro_rules! tuple_mutable {
    ($($name:ident { $($t:ident . $idx:tt),+ })+) => {
        $(
            #[doc = concat!("Mutable shape of a ", stringify!($($t),+), " tuple.")]
            pub struct $name<$($t: Mutable),+>($(pub <$t as Mutable>::Ref),+);

            impl<$($t: Mutable),+> MutRef for $name<$($t),+> {
                type Value = ($($t,)+);
            }

            impl<$($t: Mutable),+> Mutable for ($($t,)+) {
                type Ref = $name<$($t),+>;

                fn thaw(&self) -> Self::Ref {
                    $name($($t::thaw(&self.$idx)),+)
                }

                fn thaw_owned(self) -> Self::Ref {
                    $name($($t::thaw_owned(self.$idx)),+)
                }

                fn freeze(r: &Self::Ref) -> Self {
                    ($($t::freeze(&r.$idx),)+)
                }

                fn freeze_owned(r: Self::Ref) -> Self {
                    ($($t::freeze_owned(r.$idx),)+)
                }

                fn copy(r: &mut Self::Ref, value: &Self) {
                    $($t::copy(&mut r.$idx, &value.$idx);)+
                }

                fn copy_owned(r: &mut Self::Ref, value: Self) {
                    $($t::copy_owned(&mut r.$idx, value.$idx);)+
                }

                fn move_ref(dst: &mut Self::Ref, src: &Self::Ref) {
                    $($t::move_ref(&mut dst.$idx, &src.$idx);)+
                }

                fn clone_ref(r: &Self::Ref) -> Self::Ref {
                    $name($($t::clone_ref(&r.$idx)),+)
                }
            }

            impl<$($t: Mutable),+> Decompose for $name<$($t),+> {
                type Parts<'a> = ($(&'a <$t as Mutable>::Ref,)+) where Self: 'a;
                type PartsMut<'a> = ($(&'a mut <$t as Mutable>::Ref,)+) where Self: 'a;

                fn parts(&self) -> Self::Parts<'_> {
                    ($(&self.$idx,)+)
                }

                fn parts_mut(&mut self) -> Self::PartsMut<'_> {
                    ($(&mut self.$idx,)+)
                }
            }

            impl<$($t: Mutable),+> fmt::Debug for $name<$($t),+>
            where
                $(<$t as Mutable>::Ref: fmt::Debug),+
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name))
                        $(.field(&self.$idx))+
                        .finish()
                }
            }

            tuple_field_paths!([$($t),+] $name; $($t . $idx),+);
        )+
    };
}

tuple_mutable! {
    Tuple2Ref { A.0, B.1 }
    Tuple3Ref { A.0, B.1, C.2 }
    Tuple4Ref { A.0, B.1, C.2, D.3 }
    Tuple5Ref { A.0, B.1, C.2, D.3, E.4 }
    Tuple6Ref { A.0, B.1, C.2, D.3, E.4, F.5 }
}

// ============================================================================
// Option and Result through the structural engine
// ============================================================================

type OptionRep<T> = Sum<
    Labeled<Variant<Option<T>, 0>, Unit>,
    Labeled<Variant<Option<T>, 1>, Labeled<Field<Option<T>, 0>, Leaf<T>>>,
>;

impl<T: Mutable> Generic for Option<T> {
    type Rep = OptionRep<T>;

    const TYPE_NAME: &'static str = "Option";
    const FIELDS: &'static [&'static str] = &["0"];
    const VARIANTS: &'static [&'static str] = &["None", "Some"];

    fn into_rep(self) -> OptionRep<T> {
        match self {
            None => Sum::Left(Labeled::new(Unit)),
            Some(v) => Sum::Right(Labeled::new(Labeled::new(Leaf(v)))),
        }
    }

    fn from_rep(rep: OptionRep<T>) -> Self {
        match rep {
            Sum::Left(_) => None,
            Sum::Right(v) => Some(v.inner.inner.0),
        }
    }
}

type ResultRep<T, E> = Sum<
    Labeled<Variant<Result<T, E>, 0>, Labeled<Field<Result<T, E>, 0>, Leaf<T>>>,
    Labeled<Variant<Result<T, E>, 1>, Labeled<Field<Result<T, E>, 1>, Leaf<E>>>,
>;

impl<T: Mutable, E: Mutable> Generic for Result<T, E> {
    type Rep = ResultRep<T, E>;

    const TYPE_NAME: &'static str = "Result";
    const FIELDS: &'static [&'static str] = &["0", "0"];
    const VARIANTS: &'static [&'static str] = &["Ok", "Err"];

    fn into_rep(self) -> ResultRep<T, E> {
        match self {
            Ok(v) => Sum::Left(Labeled::new(Labeled::new(Leaf(v)))),
            Err(e) => Sum::Right(Labeled::new(Labeled::new(Leaf(e)))),
        }
    }

    fn from_rep(rep: ResultRep<T, E>) -> Self {
        match rep {
            Sum::Left(v) => Ok(v.inner.inner.0),
            Sum::Right(e) => Err(e.inner.inner.0),
        }
    }
}

macro_rules! generic_mutable {
    ($(impl<$($p:ident),+> for $ty:ty;)+) => {
        $(
            impl<$($p: Mutable + Clone),+> Mutable for $ty {
                type Ref = GRef<Self>;

                fn thaw(&self) -> Self::Ref {
                    generic::thaw(self.clone())
                }

                fn thaw_owned(self) -> Self::Ref {
                    generic::thaw(self)
                }

                fn freeze(r: &Self::Ref) -> Self {
                    generic::freeze(r)
                }

                fn freeze_owned(r: Self::Ref) -> Self {
                    generic::freeze_owned(r)
                }

                fn copy(r: &mut Self::Ref, value: &Self) {
                    generic::copy(r, value.clone())
                }

                fn copy_owned(r: &mut Self::Ref, value: Self) {
                    generic::copy(r, value)
                }

                fn move_ref(dst: &mut Self::Ref, src: &Self::Ref) {
                    generic::move_ref(dst, src)
                }

                fn clone_ref(r: &Self::Ref) -> Self::Ref {
                    generic::clone_ref(r)
                }
            }
        )+
    };
}

generic_mutable! {
    impl<T> for Option<T>;
    impl<T, E> for Result<T, E>;
}
