//! Integration tests for types whose mutable shape comes from their
//! structural representation.
#![allow(missing_docs)]

use piecewise::generic::{
    self, ChoiceLeft, ChoiceRight, Generic, GRef, ProductFirst, ProductSecond, RepRoot, Sum,
    Unlabel,
};
use piecewise::{Mutable, PiecewiseError, RefExt, RefPath, TotalPath};

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(generic)]
struct Config {
    name: String,
    retries: u32,
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(generic)]
enum Event {
    Start,
    Tick(u64),
    Stop { code: i32 },
}

#[derive(Debug, Clone, PartialEq, Mutable)]
#[piecewise(generic)]
struct Wrapper<T> {
    inner: T,
}

fn config() -> Config {
    Config {
        name: "svc".into(),
        retries: 3,
        verbose: false,
    }
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn test_struct_metadata() {
    assert_eq!(Config::TYPE_NAME, "Config");
    assert_eq!(Config::FIELDS, &["name", "retries", "verbose"]);
    assert!(Config::VARIANTS.is_empty());
}

#[test]
fn test_enum_metadata_flattens_fields() {
    assert_eq!(Event::TYPE_NAME, "Event");
    assert_eq!(Event::VARIANTS, &["Start", "Tick", "Stop"]);
    assert_eq!(Event::FIELDS, &["0", "code"]);
}

#[test]
fn test_labels_follow_declaration_order() {
    let r = config().thaw();
    let product = RepRoot.get(&r);

    assert_eq!(product.0.label(), "name");
    assert_eq!(product.1 .0.label(), "retries");
    assert_eq!(product.1 .1.label(), "verbose");
}

// ============================================================================
// Structs
// ============================================================================

#[test]
fn test_struct_round_trip() {
    let value = config();
    let r: GRef<Config> = value.thaw();
    assert_eq!(r.freeze(), value);
    assert_eq!(Config::freeze_owned(r), value);
}

#[test]
fn test_struct_field_through_rep_paths() {
    let mut r = config().thaw();
    let retries = RepRoot
        .then(ProductSecond)
        .then(ProductFirst)
        .then(Unlabel);

    retries.get_mut(&mut r).update(|n| *n += 2);
    RepRoot
        .then(ProductFirst)
        .then(Unlabel)
        .get_mut(&mut r)
        .set("api".into());

    assert_eq!(
        r.freeze(),
        Config {
            name: "api".into(),
            retries: 5,
            verbose: false,
        }
    );
}

#[test]
fn test_struct_copy_keeps_cells() {
    let mut r = config().thaw();
    let before: *const String = r.rep().0.inner.get();

    r.copy_from(&Config {
        name: "other".into(),
        retries: 0,
        verbose: true,
    });

    let after: *const String = r.rep().0.inner.get();
    assert_eq!(before, after);
    assert!(r.freeze().verbose);
}

#[test]
fn test_clone_is_independent() {
    let mut r = config().thaw();
    let snapshot = r.clone_ref();

    r.rep_mut().1 .1.inner.set(true);

    assert!(!snapshot.freeze().verbose);
    assert!(r.freeze().verbose);
}

#[test]
fn test_free_function_forms() {
    let mut r = generic::thaw(config());
    generic::copy(&mut r, Config {
        name: "n".into(),
        retries: 1,
        verbose: true,
    });

    let copy = generic::clone_ref(&r);
    let mut other = generic::thaw(config());
    generic::move_ref(&mut other, &copy);

    assert_eq!(generic::freeze(&other), generic::freeze_owned(r));
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn test_enum_round_trip() {
    for value in [Event::Start, Event::Tick(9), Event::Stop { code: -1 }] {
        assert_eq!(value.thaw().freeze(), value);
    }
}

#[test]
fn test_enum_variant_through_rep_paths() {
    let mut r = Event::Tick(1).thaw();
    let tick = RepRoot
        .then(ChoiceRight)
        .then(ChoiceLeft)
        .then(Unlabel)
        .then(Unlabel);

    tick.focus_mut(&mut r).unwrap().set(2);
    assert_eq!(r.freeze(), Event::Tick(2));

    r.copy_from(&Event::Stop { code: 4 });
    assert_eq!(
        tick.focus(&r).unwrap_err(),
        PiecewiseError::inactive_branch("Event", "Tick", "Stop")
    );

    let code = RepRoot
        .then(ChoiceRight)
        .then(ChoiceRight)
        .then(Unlabel)
        .then(Unlabel);
    assert_eq!(*code.focus(&r).unwrap().get(), 4);
}

#[test]
fn test_enum_active_variant_label() {
    let r = Event::Stop { code: 0 }.thaw();
    match RepRoot.get(&r).active() {
        Sum::Right(rest) => match rest.active() {
            Sum::Right(stop) => assert_eq!(stop.label(), "Stop"),
            Sum::Left(_) => panic!("expected Stop"),
        },
        Sum::Left(_) => panic!("expected Stop"),
    }
}

#[test]
fn test_enum_unit_variant_switch() {
    let mut r = Event::Tick(5).thaw();
    r.copy_from_owned(Event::Start);
    assert!(RepRoot.get(&r).is_left());
    assert_eq!(r.into_value(), Event::Start);
}

// ============================================================================
// Generic parameters
// ============================================================================

#[test]
fn test_generic_wrapper() {
    let mut r = Wrapper {
        inner: (1_u8, String::from("a")),
    }
    .thaw();

    let inner = RepRoot.then(Unlabel);
    inner.get_mut(&mut r).1.get_mut().push('b');

    assert_eq!(
        r.freeze(),
        Wrapper {
            inner: (1, "ab".to_string()),
        }
    );
}
