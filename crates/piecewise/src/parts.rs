//! Part-level operations: the `Mutable` operations applied to one component
//! of a mutable shape, reached through a path.
//!
//! Every function here focuses the path first, so the only failure mode is
//! the path's own (an inactive variant or a missing element).

use crate::{MutRef, Mutable, PiecewiseResult, RefExt, RefPath};

/// Access to every field handle of a mutable shape at once.
///
/// Implemented by `#[derive(Mutable)]` for struct refs and by the crate for
/// tuple refs. The handles are disjoint borrows, so `parts_mut` hands out all
/// of them simultaneously.
pub trait Decompose {
    /// Shared handles to every field, as a tuple.
    type Parts<'a>
    where
        Self: 'a;

    /// Exclusive handles to every field, as a tuple.
    type PartsMut<'a>
    where
        Self: 'a;

    /// Borrow every field.
    fn parts(&self) -> Self::Parts<'_>;

    /// Mutably borrow every field.
    fn parts_mut(&mut self) -> Self::PartsMut<'_>;
}

type ValueOf<P, S> = <<P as RefPath<S>>::Target as MutRef>::Value;

/// Read a snapshot of the component at `path`.
pub fn freeze_part<S, P>(path: P, source: &S) -> PiecewiseResult<ValueOf<P, S>>
where
    P: RefPath<S>,
    P::Target: MutRef,
{
    Ok(path.focus(source)?.freeze())
}

/// Overwrite the component at `path` with a copy of `value`.
pub fn copy_part<S, P>(path: P, source: &mut S, value: &ValueOf<P, S>) -> PiecewiseResult<()>
where
    P: RefPath<S>,
    P::Target: MutRef,
{
    path.focus_mut(source)?.copy_from(value);
    Ok(())
}

/// Replace the component at `path` with `f` applied to its current value.
pub fn modify_part<S, P, F>(path: P, source: &mut S, f: F) -> PiecewiseResult<()>
where
    P: RefPath<S>,
    P::Target: MutRef,
    F: FnOnce(ValueOf<P, S>) -> ValueOf<P, S>,
{
    path.focus_mut(source)?.modify(f);
    Ok(())
}

/// Copy the component at `path` of `source` into a standalone handle `dst`.
pub fn move_part_into<S, P>(path: P, dst: &mut P::Target, source: &S) -> PiecewiseResult<()>
where
    P: RefPath<S>,
    P::Target: MutRef,
{
    dst.move_from(path.focus(source)?);
    Ok(())
}

/// Overwrite the component at `path` of `dst` with the contents of `src`.
pub fn move_part_over<S, P>(path: P, dst: &mut S, src: &P::Target) -> PiecewiseResult<()>
where
    P: RefPath<S>,
    P::Target: MutRef,
{
    path.focus_mut(dst)?.move_from(src);
    Ok(())
}

/// Copy the component at `from` into the component at `to`, both inside the
/// same mutable shape.
///
/// The two paths may overlap; the source is read in full before the
/// destination is written.
pub fn move_part_within<S, P, Q>(from: P, to: Q, source: &mut S) -> PiecewiseResult<()>
where
    P: RefPath<S>,
    Q: RefPath<S, Target = P::Target>,
    P::Target: MutRef,
{
    let value = from.focus(source)?.freeze();
    to.focus_mut(source)?.copy_from_owned(value);
    Ok(())
}

/// Allocate an independent copy of the component at `path`.
pub fn clone_part<S, P>(path: P, source: &S) -> PiecewiseResult<P::Target>
where
    P: RefPath<S>,
    P::Target: MutRef,
{
    Ok(path.focus(source)?.clone_ref())
}

/// Run `f` with exclusive access to the component at `path`.
pub fn with_part<S, P, R>(
    path: P,
    source: &mut S,
    f: impl FnOnce(&mut P::Target) -> R,
) -> PiecewiseResult<R>
where
    P: RefPath<S>,
{
    Ok(f(path.focus_mut(source)?))
}

/// Thaw `value`, run `f` on its mutable shape, and freeze the result.
///
/// The shape is created from an owned value, so no copy is made on entry or
/// exit.
pub fn with_thawed<T, R>(value: T, f: impl FnOnce(&mut T::Ref) -> R) -> (T, R)
where
    T: Mutable,
{
    let mut r = value.thaw_owned();
    let out = f(&mut r);
    (T::freeze_owned(r), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementAt, Elements, FieldPath, PiecewiseError};

    type Pair = (i64, String);

    #[test]
    fn test_freeze_and_copy_part() {
        let mut r = (1_i64, "one".to_string()).thaw();
        let second = FieldPath::<Pair, 1>::new();

        assert_eq!(freeze_part(second, &r).unwrap(), "one");

        copy_part(second, &mut r, &"uno".to_string()).unwrap();
        assert_eq!(r.freeze(), (1, "uno".to_string()));
    }

    #[test]
    fn test_modify_part_leaves_sibling() {
        let mut r = (10_i64, "ten".to_string()).thaw();
        let sibling_ptr = r.1.get().as_ptr();

        modify_part(FieldPath::<Pair, 0>::new(), &mut r, |n| n * 3).unwrap();

        assert_eq!(*r.0.get(), 30);
        assert_eq!(r.1.get().as_ptr(), sibling_ptr);
    }

    #[test]
    fn test_move_part_into_and_over() {
        let r = (5_i64, "five".to_string()).thaw();
        let mut standalone = String::new().thaw();

        move_part_into(FieldPath::<Pair, 1>::new(), &mut standalone, &r).unwrap();
        assert_eq!(standalone.get(), "five");

        let mut target = (0_i64, String::new()).thaw();
        move_part_over(FieldPath::<Pair, 1>::new(), &mut target, &standalone).unwrap();
        assert_eq!(target.freeze(), (0, "five".to_string()));
    }

    #[test]
    fn test_move_part_within_same_shape() {
        let mut r = (3_i64, 9_i64).thaw();
        move_part_within(
            FieldPath::<(i64, i64), 1>::new(),
            FieldPath::<(i64, i64), 0>::new(),
            &mut r,
        )
        .unwrap();
        assert_eq!(r.freeze(), (9, 9));
    }

    #[test]
    fn test_clone_part_is_independent() {
        let mut r = (1_i64, "a".to_string()).thaw();
        let copy = clone_part(FieldPath::<Pair, 1>::new(), &r).unwrap();

        r.1.set("b".to_string());
        assert_eq!(copy.get(), "a");
    }

    #[test]
    fn test_with_part_reports_missing_element() {
        let mut r = Elements(vec![1_u8, 2]).thaw();

        let doubled = with_part(ElementAt(1), &mut r, |cell| {
            cell.update(|v| *v *= 2);
            *cell.get()
        })
        .unwrap();
        assert_eq!(doubled, 4);

        let err = with_part(ElementAt(5), &mut r, |_| ()).unwrap_err();
        assert_eq!(err, PiecewiseError::index_out_of_bounds(5, 2));
    }

    #[test]
    fn test_with_thawed_moves_storage() {
        let items = vec![1.5_f64, 2.5];
        let ptr = items.as_ptr();

        let (items, len) = with_thawed(items, |cell| {
            cell.update(|v| v[0] = 0.0);
            cell.get().len()
        });

        assert_eq!(len, 2);
        assert_eq!(items, vec![0.0, 2.5]);
        assert_eq!(items.as_ptr(), ptr);
    }

    #[test]
    fn test_decompose_tuple_ref() {
        let mut r = (1_i64, true).thaw();
        {
            let (a, b) = r.parts_mut();
            a.set(2);
            b.set(false);
        }
        let (a, b) = r.parts();
        assert_eq!((*a.get(), *b.get()), (2, false));
    }
}
