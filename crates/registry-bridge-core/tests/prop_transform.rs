//! Property-based tests for the transformation engine
//!
//! These tests check invariants that hold for arbitrary record contents.

use proptest::prelude::*;
use registry_bridge_core::{Direction, EnumDirectory, FieldDirectory, Record, Transformer};
use serde_json::{json, Value};

/// Strategy for plain JSON scalars, including null
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,24}".prop_map(Value::from),
    ]
}

/// Strategy for values a record field may hold
fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn record_strategy() -> impl Strategy<Value = Record> {
    proptest::collection::btree_map("[a-z]{1,8}", value_strategy(), 0..8)
        .prop_map(|map| map.into_iter().collect())
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

proptest! {
    /// Keys without a configured mapping never reach the output
    #[test]
    fn prop_unconfigured_fields_are_skipped(input in record_strategy()) {
        let fields = FieldDirectory::from_value(json!({
            "teacher": {
                "configured": {"toFieldName": "out", "fromType": "String", "toType": "String"}
            }
        })).unwrap();
        let enums = EnumDirectory::empty();

        let mut input = input;
        input.remove("configured");
        let output = Transformer::new(&fields, &enums)
            .transform(&input, "teacher", Direction::Write)
            .unwrap();
        prop_assert!(output.is_empty());
    }

    /// Identical non-date types without an enum copy the value unchanged
    #[test]
    fn prop_identity_pass_through(
        value in value_strategy(),
        ty in prop_oneof![Just("String"), Just("Integer"), Just("List<String>"), Just("Address")],
    ) {
        let fields = FieldDirectory::from_value(json!({
            "teacher": {"field": {"toFieldName": "copy", "fromType": ty, "toType": ty}}
        })).unwrap();
        let enums = EnumDirectory::empty();
        let mut input = Record::new();
        input.insert("field".to_string(), value.clone());

        let output = Transformer::new(&fields, &enums)
            .transform(&input, "teacher", Direction::Write)
            .unwrap();

        if is_absent(&value) {
            prop_assert!(output.is_empty());
        } else {
            prop_assert_eq!(output.get("copy"), Some(&value));
        }
    }

    /// Enum substitution round-trips through both directions for bijective tables
    #[test]
    fn prop_enum_round_trip(pick in 0usize..3, upper in any::<bool>()) {
        let tokens = ["yes", "no", "maybe"];
        let fields = FieldDirectory::from_value(json!({
            "teacher": {"answer": {"toFieldName": "answer", "fromType": "String", "toType": "String", "enum": "answer"}}
        })).unwrap();
        let enums = EnumDirectory::from_value(json!({
            "enums": {"answer": {"yes": "Y", "no": "N", "maybe": "M"}}
        })).unwrap();
        let transformer = Transformer::new(&fields, &enums);

        let token = if upper { tokens[pick].to_uppercase() } else { tokens[pick].to_string() };
        let written = transformer
            .transform_value(&json!({"answer": token}), "teacher", Direction::Write)
            .unwrap();
        let read = transformer
            .transform_value(&written, "teacher", Direction::Read)
            .unwrap();
        prop_assert_eq!(read, json!({"answer": tokens[pick]}));
    }
}
