//! Integration tests for the Mutable derive macro.
#![allow(missing_docs)]

use piecewise::{
    by_type, clone_part, copy_part, freeze_part, modify_part, move_part_over, move_part_within,
    with_part, Decompose, ElementAt, Elements, FieldPath, MutCell, MutRef, Mutable,
    PiecewiseError, RefExt, RefPath, TotalPath,
};

// ============================================================================
// Named structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Profile {
    pub name: String,
    pub age: u32,
    pub tags: Vec<String>,
}

fn alice() -> Profile {
    Profile {
        name: "Alice".into(),
        age: 30,
        tags: vec!["admin".into()],
    }
}

#[test]
fn test_struct_round_trip() {
    let value = alice();
    let r = value.thaw();
    assert_eq!(r.freeze(), value);
    assert_eq!(r.into_value(), value);
}

#[test]
fn test_struct_ref_mirrors_fields() {
    let mut r = alice().thaw();

    r.age.set(31);
    r.name.get_mut().push_str(" Smith");

    assert_eq!(*r.age.get(), 31);
    assert_eq!(r.name.get(), "Alice Smith");
    assert_eq!(r.freeze().tags, vec!["admin".to_string()]);
}

#[test]
fn test_named_field_paths() {
    let mut r = alice().thaw();

    ProfileRef::age().get_mut(&mut r).update(|a| *a += 1);
    let name: &MutCell<String> = ProfileRef::name().get(&r);

    assert_eq!(name.get(), "Alice");
    assert_eq!(r.freeze().age, 31);
}

#[test]
fn test_positional_field_paths() {
    let mut r = alice().thaw();
    FieldPath::<Profile, 1>::new().get_mut(&mut r).set(40);
    assert_eq!(r.freeze().age, 40);
}

#[test]
fn test_copy_keeps_field_storage() {
    let mut r = alice().thaw();
    let tags_cell: *const Vec<String> = r.tags.get();

    r.copy_from(&Profile {
        name: "Bob".into(),
        age: 25,
        tags: vec![],
    });

    let after: *const Vec<String> = r.tags.get();
    assert_eq!(tags_cell, after);
    assert_eq!(r.freeze().name, "Bob");
}

#[test]
fn test_thaw_owned_moves_storage() {
    let value = alice();
    let name_ptr = value.name.as_ptr();

    let r = value.thaw_owned();
    assert_eq!(r.name.get().as_ptr(), name_ptr);

    let back = Profile::freeze_owned(r);
    assert_eq!(back.name.as_ptr(), name_ptr);
}

#[test]
fn test_decompose_all_fields() {
    let mut r = alice().thaw();
    {
        let (name, age, tags) = r.parts_mut();
        name.set("Carol".into());
        age.set(22);
        tags.get_mut().clear();
    }

    let (name, age, _) = r.parts();
    assert_eq!((name.get().as_str(), *age.get()), ("Carol", 22));
}

#[test]
fn test_ref_debug_hides_contents() {
    let r = alice().thaw();
    assert_eq!(format!("{:?}", r), "Profile { .. }");
}

// ============================================================================
// Tuple and unit structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Point(pub i32, pub i32);

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Marker;

#[test]
fn test_tuple_struct() {
    let mut r = Point(1, 2).thaw();
    r.1.set(20);
    FieldPath::<Point, 0>::new().get_mut(&mut r).set(10);
    assert_eq!(r.freeze(), Point(10, 20));

    let (x, y) = r.parts();
    assert_eq!((*x.get(), *y.get()), (10, 20));
}

#[test]
fn test_unit_struct() {
    let mut r = Marker.thaw();
    r.copy_from(&Marker);
    assert_eq!(r.clone_ref().freeze(), Marker);
    let () = r.parts();
}

// ============================================================================
// Nested structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Account {
    pub id: u64,
    pub owner: Profile,
    pub origin: Point,
}

fn account() -> Account {
    Account {
        id: 7,
        owner: alice(),
        origin: Point(0, 0),
    }
}

#[test]
fn test_nested_paths_compose() {
    let mut r = account().thaw();

    let owner_age = AccountRef::owner().then(ProfileRef::age());
    owner_age.get_mut(&mut r).set(50);

    let origin_y = AccountRef::origin().then(FieldPath::<Point, 1>::new());
    origin_y.get_mut(&mut r).set(-3);

    let frozen = r.freeze();
    assert_eq!(frozen.owner.age, 50);
    assert_eq!(frozen.origin, Point(0, -3));
    assert_eq!(frozen.owner.name, "Alice");
}

#[test]
fn test_nested_copy_recurses() {
    let mut r = account().thaw();
    let name_cell: *const String = r.owner.name.get();

    let mut next = account();
    next.owner.name = "Dave".into();
    r.copy_from_owned(next);

    let after: *const String = r.owner.name.get();
    assert_eq!(name_cell, after);
    assert_eq!(r.owner.name.get(), "Dave");
}

#[test]
fn test_part_operations_through_nested_paths() {
    let mut r = account().thaw();
    let owner_name = AccountRef::owner().then(ProfileRef::name());

    assert_eq!(freeze_part(owner_name, &r).unwrap(), "Alice");

    copy_part(owner_name, &mut r, &"Eve".to_string()).unwrap();
    modify_part(AccountRef::id(), &mut r, |id| id * 2).unwrap();

    let snapshot = clone_part(AccountRef::owner(), &r).unwrap();
    r.owner.age.set(99);

    assert_eq!(snapshot.freeze().name, "Eve");
    assert_eq!(snapshot.freeze().age, 30);
    assert_eq!(r.freeze().id, 14);
}

#[test]
fn test_move_part_over_and_within() {
    let mut r = Point(1, 2).thaw();
    move_part_within(
        FieldPath::<Point, 0>::new(),
        FieldPath::<Point, 1>::new(),
        &mut r,
    )
    .unwrap();
    assert_eq!(r.freeze(), Point(1, 1));

    let mut acc = account().thaw();
    move_part_over(AccountRef::origin(), &mut acc, &r).unwrap();
    assert_eq!(acc.freeze().origin, Point(1, 1));
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
enum Shape {
    Empty,
    Circle { radius: f64 },
    Rect(f64, f64),
}

#[test]
fn test_enum_round_trip() {
    for value in [
        Shape::Empty,
        Shape::Circle { radius: 1.5 },
        Shape::Rect(2.0, 3.0),
    ] {
        assert_eq!(value.thaw().freeze(), value);
        assert_eq!(value.clone().thaw_owned().into_value(), value);
    }
}

#[test]
fn test_enum_variant_paths() {
    let mut r = Shape::Circle { radius: 1.0 }.thaw();

    ShapeRef::circle_radius().focus_mut(&mut r).unwrap().set(2.0);
    assert_eq!(r.freeze(), Shape::Circle { radius: 2.0 });

    let err = ShapeRef::rect_1().focus(&r).unwrap_err();
    assert_eq!(
        err,
        PiecewiseError::inactive_branch("Shape", "Rect", "Circle")
    );
}

#[test]
fn test_enum_copy_same_variant_reuses_cells() {
    let mut r = Shape::Rect(1.0, 1.0).thaw();
    let width: *const MutCell<f64> = ShapeRef::rect_0().focus(&r).unwrap();

    r.copy_from(&Shape::Rect(4.0, 5.0));

    let after: *const MutCell<f64> = ShapeRef::rect_0().focus(&r).unwrap();
    assert_eq!(width, after);
    assert_eq!(r.freeze(), Shape::Rect(4.0, 5.0));
}

#[test]
fn test_enum_copy_other_variant_switches_branch() {
    let mut r = Shape::Rect(1.0, 1.0).thaw();

    r.copy_from(&Shape::Empty);
    assert_eq!(r.variant_name(), "Empty");
    assert!(ShapeRef::rect_0().focus(&r).is_err());

    r.copy_from_owned(Shape::Circle { radius: 9.0 });
    assert!(matches!(r.branch(), ShapeBranch::Circle { .. }));
    assert_eq!(r.freeze(), Shape::Circle { radius: 9.0 });
}

#[test]
fn test_enum_move_and_clone() {
    let src = Shape::Circle { radius: 3.0 }.thaw();
    let mut dst = Shape::Empty.thaw();

    dst.move_from(&src);
    assert_eq!(dst.freeze(), Shape::Circle { radius: 3.0 });

    let cloned = dst.clone_ref();
    ShapeRef::circle_radius()
        .focus_mut(&mut dst)
        .unwrap()
        .set(0.5);
    assert_eq!(cloned.freeze(), Shape::Circle { radius: 3.0 });
    assert_eq!(src.freeze(), Shape::Circle { radius: 3.0 });
}

#[test]
fn test_enum_set_branch() {
    let mut r = Shape::Empty.thaw();
    let previous = r.set_branch(ShapeBranch::Rect(MutCell::new(1.0), MutCell::new(2.0)));

    assert!(matches!(previous, ShapeBranch::Empty));
    assert_eq!(r.freeze(), Shape::Rect(1.0, 2.0));
    assert_eq!(format!("{:?}", r), "Shape(\"Rect\")");
}

#[derive(Debug, Clone, PartialEq, Mutable)]
enum Never {}

#[test]
fn test_empty_enum_registers() {
    fn assert_mutable<T: Mutable>() {}
    assert_mutable::<Never>();
}

// ============================================================================
// Generic types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Tagged<T> {
    pub tag: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Mutable)]
enum Slot<T> {
    Vacant,
    Filled(T),
}

#[test]
fn test_generic_struct() {
    let mut r = Tagged {
        tag: "p".into(),
        value: Point(1, 1),
    }
    .thaw();

    r.value.0.set(5);
    TaggedRef::<Point>::tag().get_mut(&mut r).set("q".into());

    assert_eq!(
        r.freeze(),
        Tagged {
            tag: "q".into(),
            value: Point(5, 1),
        }
    );
}

#[test]
fn test_generic_enum() {
    let mut r = Slot::Filled(3_u8).thaw();
    SlotRef::<u8>::filled_0()
        .focus_mut(&mut r)
        .unwrap()
        .set(4);
    assert_eq!(r.freeze(), Slot::Filled(4));

    r.copy_from(&Slot::Vacant);
    assert_eq!(r.freeze(), Slot::Vacant);
}

// ============================================================================
// Attributes
// ============================================================================

/// A type with no `Mutable` registration of its own.
#[derive(Debug, Clone, PartialEq)]
struct Opaque(u32);

#[derive(Debug, Clone, PartialEq, Mutable)]
struct WithLeafField {
    pub id: u8,
    #[piecewise(leaf)]
    pub opaque: Opaque,
}

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(leaf)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(ref_name = "CounterHandle")]
struct Counter {
    pub hits: u64,
}

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(by_type)]
struct Reading {
    pub label: String,
    pub value: f64,
    pub note: String,
}

#[test]
fn test_leaf_field_is_one_cell() {
    let mut r = WithLeafField {
        id: 1,
        opaque: Opaque(2),
    }
    .thaw();

    let cell: &mut MutCell<Opaque> = &mut r.opaque;
    cell.set(Opaque(3));

    assert_eq!(r.freeze().opaque, Opaque(3));
}

#[test]
fn test_leaf_container() {
    let mut r: MutCell<Color> = Color { r: 1, g: 2, b: 3 }.thaw();
    r.update(|c| c.g = 200);
    assert_eq!(r.freeze(), Color { r: 1, g: 200, b: 3 });
}

#[test]
fn test_custom_ref_name() {
    let mut r: CounterHandle = Counter { hits: 0 }.thaw();
    CounterHandle::hits().get_mut(&mut r).update(|h| *h += 1);
    assert_eq!(r.freeze(), Counter { hits: 1 });
}

#[test]
fn test_by_type_picks_first_field() {
    let mut r = Reading {
        label: "temp".into(),
        value: 21.5,
        note: "indoor".into(),
    }
    .thaw();

    by_type::<Reading, String>().get_mut(&mut r).set("humidity".into());
    by_type::<Reading, f64>().get_mut(&mut r).set(40.0);

    let frozen = r.freeze();
    assert_eq!(frozen.label, "humidity");
    assert_eq!(frozen.note, "indoor");
    assert_eq!(frozen.value, 40.0);
}

// ============================================================================
// Traversal fields
// ============================================================================

#[derive(Debug, Clone, PartialEq, Mutable)]
struct Series {
    pub name: String,
    pub points: Elements<Point>,
}

#[test]
fn test_elements_field_paths() {
    let mut r = Series {
        name: "s".into(),
        points: Elements(vec![Point(0, 0), Point(1, 1)]),
    }
    .thaw();

    let second_y = SeriesRef::points()
        .then(ElementAt(1))
        .then(FieldPath::<Point, 1>::new());
    with_part(second_y, &mut r, |y| y.set(10)).unwrap();

    assert_eq!(
        r.freeze().points,
        Elements(vec![Point(0, 0), Point(1, 10)])
    );

    let missing = SeriesRef::points().then(ElementAt(5));
    assert!(missing.focus(&r).is_err());
}

#[test]
fn test_ref_types_name_their_values() {
    fn value_of<R: MutRef>(_: &R) -> &'static str {
        std::any::type_name::<R::Value>()
    }

    let r = Point(0, 0).thaw();
    assert!(value_of(&r).ends_with("Point"));
}
