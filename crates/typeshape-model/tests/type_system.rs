//! Integration tests: model declaration, structural validation, creation and
//! assignment through the public `types` vocabulary.

use serde_json::{json, Value};
use typeshape_model::types;
use typeshape_model::{AssignmentError, ConstructionError, Field, MemberError, ModelType};

fn test_factories() -> (ModelType, ModelType, ModelType) {
    let box_model = types::model(types::Shape::new().field("width", 0).field("height", 0)).unwrap();
    let square = types::model(types::Shape::new().field("width", 0).field("height", 0)).unwrap();
    let cube = types::model(
        types::Shape::new()
            .field("width", 0)
            .field("height", 0)
            .field("depth", 0),
    )
    .unwrap();
    (box_model, square, cube)
}

// ─── Validation ──────────────────────────────────────────────────────

#[test]
fn test_recognizes_valid_snapshot() {
    let (box_model, _, _) = test_factories();
    assert!(box_model.is(&json!({"width": 1, "height": 2})));
    assert!(box_model.is(&json!({"width": 1, "height": 2, "depth": 3})));
}

#[test]
fn test_recognizes_invalid_snapshot() {
    let (box_model, _, _) = test_factories();
    assert!(!box_model.is(&json!({"width": "1", "height": "2"})));
}

#[test]
fn test_checks_valid_nodes() {
    let (box_model, _, _) = test_factories();
    let doc = box_model.create_empty().unwrap();
    assert!(box_model.is_instance(&doc));
}

#[test]
fn test_checks_invalid_nodes() {
    let (box_model, _, _) = test_factories();
    let doc = box_model.create_empty().unwrap();
    let other = types::model(types::Shape::new().field("anotherAttr", types::number())).unwrap();
    assert!(!other.is_instance(&doc));
}

#[test]
fn test_accepts_compatible_factories() {
    let (box_model, square, _) = test_factories();
    let doc = square.create_empty().unwrap();
    assert!(box_model.is_instance(&doc));
    assert!(!box_model.same_model(&square));
}

#[test]
fn test_non_object_values_are_mismatches() {
    let (box_model, _, _) = test_factories();
    for v in [json!(null), json!(1), json!("box"), json!([1, 2]), json!(true)] {
        assert!(!box_model.is(&v), "{v}");
    }
}

// ─── Superfluous and defaulted fields ────────────────────────────────

#[test]
fn test_accepts_superfluous_fields() {
    let item = types::model(
        types::Shape::new()
            .field("id", types::number())
            .field("name", types::string()),
    )
    .unwrap();

    assert!(!item.is(&json!({})));
    assert!(!item.is(&json!({"id": 3})));
    assert!(item.is(&json!({"id": 3, "name": ""})));
    assert!(item.is(&json!({"id": 3, "name": "", "description": ""})));

    let a = item
        .create(&json!({"id": 3, "name": "", "description": "bla"}))
        .unwrap();
    assert!(a.get("description").is_none());
}

#[test]
fn test_does_not_require_defaulted_fields() {
    let item = types::model(
        types::Shape::new()
            .field("id", types::number())
            .field("name", types::with_default(types::string(), "boo")),
    )
    .unwrap();

    assert!(!item.is(&json!({})));
    assert!(item.is(&json!({"id": 3})));
    assert!(item.is(&json!({"id": 3, "name": ""})));
    assert!(item.is(&json!({"id": 3, "name": "", "description": ""})));

    let a = item.create(&json!({"id": 3, "description": "bla"})).unwrap();
    assert!(a.get("description").is_none());
    assert_eq!(a.value("name"), Some(json!("boo")));
}

#[test]
fn test_defaulted_fields_may_be_omitted_with_literal_shorthand() {
    let item = types::model(
        types::Shape::new()
            .field("id", types::number())
            .field("name", "boo"),
    )
    .unwrap();

    assert!(!item.is(&json!({})));
    assert!(item.is(&json!({"id": 3})));
    assert!(item.is(&json!({"id": 3, "name": ""})));
    assert!(item.is(&json!({"id": 3, "name": "", "description": ""})));

    let a = item.create(&json!({"id": 3, "description": "bla"})).unwrap();
    assert!(a.get("description").is_none());
    assert_eq!(a.value("name"), Some(json!("boo")));

    let b = item.create(&json!({"id": 3, "name": ""})).unwrap();
    assert_eq!(b.value("name"), Some(json!("")));
}

#[test]
fn test_picks_correct_type_of_defaulted_fields() {
    let item = types::model(
        types::Shape::new()
            .field("id", types::number())
            .field("name", "boo"),
    )
    .unwrap();

    let mut a = item.create(&json!({"id": 3})).unwrap();
    assert_eq!(a.value("name"), Some(json!("boo")));

    let err = a.set("name", 3).unwrap_err();
    assert!(
        err.to_string().contains("Value is not assignable to 'string'"),
        "unexpected message: {err}"
    );
    assert_eq!(a.value("name"), Some(json!("boo")));
}

// ─── Live instances, nesting and members ─────────────────────────────

fn model_a() -> ModelType {
    types::model_named(
        "A",
        types::Shape::new()
            .field("x", types::number())
            .field("y", types::maybe(types::string()))
            .method("bump", |inst, _args| {
                let next = inst.value("x").and_then(|v| v.as_f64()).unwrap_or(0.0) + 1.0;
                inst.set("x", next)?;
                Ok(json!(next))
            })
            .computed_with_setter("z", |_| json!("hi"), |_, _| Ok(())),
    )
    .unwrap()
}

#[test]
fn test_instance_fields_are_typed_and_assignable() {
    let a_model = model_a();
    let mut a = a_model.create(&json!({"x": 2, "y": "7"})).unwrap();
    assert_eq!(a.value("x"), Some(json!(2)));

    a.set("x", 7).unwrap();
    assert_eq!(a.value("x"), Some(json!(7)));

    let err = a.set("x", "stuff").unwrap_err();
    assert!(matches!(err, AssignmentError::NotAssignable { .. }));
    assert_eq!(a.value("x"), Some(json!(7)));
}

#[test]
fn test_optional_field_accepts_absence_value() {
    let mut a = model_a().create(&json!({"x": 2, "y": "7"})).unwrap();
    a.set("y", Value::Null).unwrap();
    assert_eq!(a.value("y"), Some(Value::Null));
    a.set("y", "again").unwrap();
    assert_eq!(a.value("y"), Some(json!("again")));
}

#[test]
fn test_sub_models_can_be_reassigned() {
    let a_model = model_a();
    let b_model = types::model(types::Shape::new().field("sub", types::maybe(&a_model))).unwrap();

    let mut b = b_model.create_empty().unwrap();
    assert!(b.get("sub").unwrap().is_null());

    b.set("sub", a_model.create(&json!({"x": 3})).unwrap()).unwrap();
    assert_eq!(b.value("sub"), Some(json!({"x": 3, "y": null})));

    let sub = b.node_mut("sub").expect("sub should be a live node");
    sub.set("x", 4).unwrap();
    assert!(sub.set("x", "four").is_err());
    assert_eq!(b.value("sub"), Some(json!({"x": 4, "y": null})));
}

#[test]
fn test_sub_model_rejects_incompatible_instance() {
    let a_model = model_a();
    let b_model = types::model(types::Shape::new().field("sub", types::maybe(&a_model))).unwrap();
    let other = types::model(types::Shape::new().field("w", 1)).unwrap();

    let mut b = b_model.create_empty().unwrap();
    let err = b.set("sub", other.create_empty().unwrap()).unwrap_err();
    match err {
        AssignmentError::NotAssignable { expected, .. } => assert_eq!(expected, "A | null"),
        other => panic!("Expected NotAssignable, got: {other}"),
    }
    assert!(b.get("sub").unwrap().is_null());
}

#[test]
fn test_raw_snapshot_assignment_is_a_construction_request() {
    let a_model = model_a();
    let b_model = types::model(types::Shape::new().field("sub", types::maybe(&a_model))).unwrap();
    let mut b = b_model.create_empty().unwrap();

    b.set("sub", json!({"x": 5, "junk": true})).unwrap();
    match b.get("sub").unwrap() {
        Field::Node(node) => {
            assert_eq!(node.snapshot(), json!({"x": 5, "y": null}));
            assert!(node.model().same_model(&a_model));
        }
        other => panic!("Expected Node, got: {other:?}"),
    }

    assert!(b.set("sub", json!({"y": "no x"})).is_err());
    assert_eq!(b.value("sub"), Some(json!({"x": 5, "y": null})));
}

#[test]
fn test_compatible_instance_is_rebuilt_in_slot_model() {
    let (box_model, square, _) = test_factories();
    let holder = types::model(types::Shape::new().field("shape", &box_model)).unwrap();
    let mut h = holder.create(&json!({"shape": {}})).unwrap();

    h.set("shape", square.create(&json!({"width": 2})).unwrap()).unwrap();
    assert!(h.node("shape").unwrap().model().same_model(&box_model));
    assert_eq!(h.value("shape"), Some(json!({"width": 2, "height": 0})));

    let own = box_model.create(&json!({"width": 7})).unwrap();
    h.set("shape", own).unwrap();
    assert!(h.node("shape").unwrap().model().same_model(&box_model));
}

#[test]
fn test_nested_writes_follow_slot_type_after_looser_instance() {
    let tight = types::model(types::Shape::new().field("width", types::number())).unwrap();
    let loose = types::model(types::Shape::new().field("width", types::maybe(types::number()))).unwrap();
    let holder = types::model(types::Shape::new().field("shape", &tight)).unwrap();
    let mut h = holder.create(&json!({"shape": {"width": 1}})).unwrap();

    h.set("shape", loose.create(&json!({"width": 2})).unwrap()).unwrap();
    let shape = h.node_mut("shape").expect("shape should be a live node");
    let err = shape.set("width", Value::Null).unwrap_err();
    match err {
        AssignmentError::NotAssignable { expected, .. } => assert_eq!(expected, "number"),
        other => panic!("Expected NotAssignable, got: {other}"),
    }
    assert_eq!(h.value("shape"), Some(json!({"width": 2})));
    assert!(holder.is_instance(&h));

    assert!(h.set("shape", loose.create(&json!({})).unwrap()).is_err());
    assert_eq!(h.value("shape"), Some(json!({"width": 2})));
}

#[test]
fn test_wider_instance_drops_undeclared_fields() {
    let (box_model, _, cube) = test_factories();
    let holder = types::model(types::Shape::new().field("shape", &box_model)).unwrap();
    let mut h = holder.create(&json!({"shape": {}})).unwrap();

    h.set("shape", cube.create(&json!({"width": 1, "height": 2, "depth": 3})).unwrap())
        .unwrap();
    assert_eq!(h.snapshot(), json!({"shape": {"width": 1, "height": 2}}));
    assert_eq!(holder.create(&h.snapshot()).unwrap().snapshot(), h.snapshot());
    assert!(h.node("shape").unwrap().get("depth").is_none());
}

#[test]
fn test_members_bypass_validation() {
    let mut a = model_a().create(&json!({"x": 2})).unwrap();

    assert_eq!(a.read("z").unwrap(), json!("hi"));
    a.write("z", json!(42)).unwrap();
    assert_eq!(a.read("z").unwrap(), json!("hi"));

    assert_eq!(a.call("bump", &[]).unwrap(), json!(3.0));
    assert_eq!(a.value("x"), Some(json!(3.0)));

    assert!(a.get("z").is_none());
    assert!(a.get("bump").is_none());
    assert!(a.snapshot().get("z").is_none());
}

#[test]
fn test_member_errors() {
    let m = types::model(
        types::Shape::new()
            .field("x", 0)
            .computed("double", |inst| {
                json!(inst.value("x").and_then(|v| v.as_i64()).unwrap_or(0) * 2)
            })
            .method("break", |inst, _| {
                inst.set("x", "not a number")?;
                Ok(Value::Null)
            }),
    )
    .unwrap();
    let mut a = m.create(&json!({"x": 4})).unwrap();

    assert_eq!(a.read("double").unwrap(), json!(8));
    assert!(matches!(
        a.write("double", json!(1)),
        Err(MemberError::ReadOnly { .. })
    ));
    assert!(matches!(
        a.call("double", &[]),
        Err(MemberError::WrongKind { .. })
    ));
    assert!(matches!(
        a.read("break"),
        Err(MemberError::WrongKind { .. })
    ));
    assert!(matches!(
        a.call("missing", &[]),
        Err(MemberError::UnknownMember { .. })
    ));

    // Writes a method performs through `set` are still validated.
    assert!(matches!(a.call("break", &[]), Err(MemberError::Failed { .. })));
    assert_eq!(a.value("x"), Some(json!(4)));
}

// ─── Construction errors ─────────────────────────────────────────────

#[test]
fn test_construction_errors_are_atomic_and_located() {
    let a_model = model_a();
    let b_model = types::model(
        types::Shape::new()
            .field("label", types::string())
            .field("sub", &a_model),
    )
    .unwrap();

    let err = b_model
        .create(&json!({"label": "ok", "sub": {"x": "3"}}))
        .unwrap_err();
    match &err {
        ConstructionError::TypeMismatch { path, expected, .. } => {
            assert_eq!(path.to_string(), "sub.x");
            assert_eq!(expected, "number");
        }
        other => panic!("Expected TypeMismatch, got: {other}"),
    }

    let err = b_model.create(&json!({"sub": {"x": 1}})).unwrap_err();
    assert!(matches!(err, ConstructionError::MissingField { .. }));
    assert_eq!(err.path().to_string(), "label");
}

#[test]
fn test_create_is_idempotent_on_full_input() {
    let item = types::model(
        types::Shape::new()
            .field("id", types::number())
            .field("name", "boo")
            .field("tag", types::maybe(types::string())),
    )
    .unwrap();
    let first = item.create(&json!({"id": 1})).unwrap();
    let second = item.create(&first.snapshot()).unwrap();
    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first, second);

    let third = item.create_from(&second).unwrap();
    assert_eq!(third.snapshot(), json!({"id": 1, "name": "boo", "tag": null}));
}
