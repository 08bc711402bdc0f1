//! Property tests for structural matching, instantiation and assignment.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use typeshape_model::types;
use typeshape_model::ModelType;

fn item() -> ModelType {
    let inner = types::model_named("Inner", types::Shape::new().field("x", types::number())).unwrap();
    types::model_named(
        "Item",
        types::Shape::new()
            .field("id", types::number())
            .field("name", types::with_default(types::string(), "boo"))
            .field("tag", types::maybe(types::string()))
            .field("sub", types::maybe(inner)),
    )
    .unwrap()
}

/// JSON values without floats, so snapshots compare exactly.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(field_name(), inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Keys biased towards the names the test models declare.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("id".to_string()),
        Just("name".to_string()),
        Just("tag".to_string()),
        Just("sub".to_string()),
        Just("x".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Objects built mostly from declared keys, so a good share of them match.
fn candidate() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(field_name(), json_value(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Objects that always satisfy `item()`, with optional fields left out at
/// random and undeclared keys mixed in.
fn matching() -> impl Strategy<Value = Value> {
    (
        any::<i64>(),
        prop::option::of("[a-z]{0,8}"),
        prop::option::of(prop::option::of("[a-z]{0,8}")),
        prop::option::of(prop::option::of(any::<i64>())),
        prop::collection::btree_map("[a-z]{1,4}", json_value(), 0..3),
    )
        .prop_map(|(id, name, tag, sub, extras)| {
            let mut map: Map<String, Value> = extras
                .into_iter()
                .map(|(k, v)| (format!("extra_{k}"), v))
                .collect();
            map.insert("id".into(), json!(id));
            if let Some(name) = name {
                map.insert("name".into(), json!(name));
            }
            if let Some(tag) = tag {
                map.insert("tag".into(), json!(tag));
            }
            if let Some(sub) = sub {
                map.insert("sub".into(), sub.map_or(Value::Null, |x| json!({"x": x, "y": true})));
            }
            Value::Object(map)
        })
}

fn with_extras(value: &Value, extras: &Map<String, Value>) -> Value {
    let mut out = value.clone();
    if let Value::Object(map) = &mut out {
        for (k, v) in extras {
            map.insert(format!("extra_{k}"), v.clone());
        }
    }
    out
}

proptest! {
    /// Undeclared properties never change the validation outcome.
    #[test]
    fn superfluous_keys_do_not_affect_is(
        value in candidate(),
        extras in prop::collection::btree_map("[a-z]{1,4}", json_value(), 0..4),
    ) {
        let m = item();
        let extras: Map<String, Value> = extras.into_iter().collect();
        prop_assert_eq!(m.is(&value), m.is(&with_extras(&value, &extras)));
    }

    /// The diagnostic report agrees with the boolean validator.
    #[test]
    fn report_agrees_with_is(value in candidate()) {
        let m = item();
        let report = m.check(&value);
        prop_assert_eq!(report.is_valid(), m.is(&value), "report: {}", report);
    }

    /// Creation succeeds exactly for matching input.
    #[test]
    fn create_succeeds_iff_is(value in candidate()) {
        let m = item();
        prop_assert_eq!(m.create(&value).is_ok(), m.is(&value));
    }

    /// Declared properties survive creation unchanged; the snapshot itself
    /// matches and re-creates to the same data.
    #[test]
    fn create_preserves_declared_fields(value in matching()) {
        let m = item();
        prop_assert!(m.is(&value));
        let instance = m.create(&value).unwrap();
        let snapshot = instance.snapshot();

        for key in ["id", "name", "tag"] {
            if let Some(given) = value.get(key) {
                prop_assert_eq!(snapshot.get(key), Some(given));
            }
        }
        if let Some(x) = value.get("sub").and_then(|sub| sub.get("x")) {
            prop_assert_eq!(&snapshot["sub"], &json!({"x": x}));
        }
        prop_assert!(m.is(&snapshot));
        prop_assert_eq!(m.create(&snapshot).unwrap().snapshot(), snapshot);
    }

    /// A rejected write leaves the instance exactly as it was.
    #[test]
    fn failed_assignment_is_a_no_op(field in field_name(), value in json_value()) {
        let m = item();
        let mut instance = m.create(&json!({"id": 1, "sub": {"x": 2}})).unwrap();
        let before = instance.snapshot();
        match instance.set(&field, value.clone()) {
            Ok(()) => {
                let descriptor = m.descriptor().field(&field).unwrap();
                prop_assert!(typeshape_model::Descriptor::matches(descriptor, &value));
            }
            Err(_) => prop_assert_eq!(instance.snapshot(), before),
        }
    }
}
