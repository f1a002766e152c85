//! Tests for the transformation engine
//!
//! Covers dispatch across the four cardinality cases, nested custom-type
//! recursion, enum direction handling and the fail-fast error behavior.

#[cfg(test)]
mod tests {
    use super::super::{transform, Transformer, DEFAULT_MAX_DEPTH};
    use crate::directory::{EnumDirectory, FieldDirectory};
    use crate::error::{Error, TransformError};
    use crate::types::{Direction, Record};
    use serde_json::{json, Value};

    fn fields() -> FieldDirectory {
        FieldDirectory::from_value(json!({
            "teacher": {
                "name": {"toFieldName": "name", "fromType": "String", "toType": "String"},
                "fullName": {
                    "fromFieldName": ["firstName", "lastName"],
                    "toFieldName": "profile.fullName", "fromType": "String", "toType": "String"
                },
                "city": {
                    "fromFieldName": "address.city",
                    "toFieldName": "profile.location.city", "fromType": "String", "toType": "String"
                },
                "gender": {"toFieldName": "gender", "fromType": "String", "toType": "String", "enum": "gender"},
                "active": {"toFieldName": "active", "fromType": "String", "toType": "Boolean", "enum": {"yes": "true", "no": "false"}},
                "dob": {
                    "toFieldName": "dateOfBirth", "fromType": "DateString", "toType": "DateString",
                    "fromDateFormat": "yyyy-MM-dd", "toDateFormat": "dd/MM/yyyy"
                },
                "subject": {"toFieldName": "subjects", "fromType": "String", "toType": "List<String>"},
                "extraSubjects": {"toFieldName": "subjects", "fromType": "List<String>", "toType": "List<String>"},
                "grades": {"toFieldName": "grade", "fromType": "List<Integer>", "toType": "Long"},
                "scores": {"toFieldName": "scores", "fromType": "List<String>", "toType": "List<Double>"},
                "externalIds": {
                    "toFieldName": "userId", "fromType": "List<ExternalId>", "toType": "String",
                    "filters": [{"field": "provider", "values": ["P2"]}],
                    "filterField": "id"
                },
                "addresses": {"toFieldName": "addresses", "fromType": "List<Address>", "toType": "List<RegistryAddress>"},
                "badList": {"toFieldName": "bad", "fromType": "List<Address>", "toType": "List<String>"},
                "broken": {"toFieldName": "", "fromType": "String", "toType": "String"}
            },
            "Address": {
                "line1": {"toFieldName": "street", "fromType": "String", "toType": "String"},
                "pin": {"toFieldName": "postal.code", "fromType": "String", "toType": "Integer"}
            }
        }))
        .unwrap()
    }

    fn enums() -> EnumDirectory {
        EnumDirectory::from_value(json!({"enums": {"gender": {"male": "M", "female": "F"}}})).unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn write(input: Value) -> crate::Result<Value> {
        transform(&fields(), &record(input), "teacher", &enums(), Direction::Write).map(Value::Object)
    }

    fn transform_error(input: Value) -> TransformError {
        match write(input) {
            Err(Error::Transform(e)) => e,
            other => panic!("expected a transform error, got {:?}", other),
        }
    }

    #[test]
    fn test_unconfigured_fields_are_skipped() {
        let out = write(json!({"name": "Ada", "nickname": "ada99", "favoriteColor": "blue"})).unwrap();
        assert_eq!(out, json!({"name": "Ada"}));
    }

    #[test]
    fn test_unknown_schema_yields_empty_output() {
        let out = transform(&fields(), &record(json!({"name": "Ada"})), "student", &enums(), Direction::Write)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let out = write(json!({"name": null, "subject": "   ", "extraSubjects": [], "gender": null})).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_identity_pass_through_keeps_raw_value() {
        // Identical types copy the value without coercion
        let out = write(json!({"name": 42})).unwrap();
        assert_eq!(out, json!({"name": 42}));
    }

    #[test]
    fn test_joined_and_nested_sources() {
        let out = write(json!({
            "fullName": "ignored",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "city": "x",
            "address": {"city": "London"}
        }))
        .unwrap();
        assert_eq!(
            out,
            json!({"profile": {"fullName": "Ada Lovelace", "location": {"city": "London"}}})
        );
    }

    #[test]
    fn test_joined_source_without_parts_is_skipped() {
        let out = write(json!({"fullName": "ignored"})).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_enum_write_and_read() {
        let out = write(json!({"gender": "FEMALE", "active": "Yes"})).unwrap();
        assert_eq!(out, json!({"gender": "F", "active": true}));

        let out = transform(
            &fields(),
            &record(json!({"gender": "m"})),
            "teacher",
            &enums(),
            Direction::Read,
        )
        .unwrap();
        assert_eq!(Value::Object(out), json!({"gender": "male"}));
    }

    #[test]
    fn test_unknown_enum_token() {
        assert_eq!(
            transform_error(json!({"gender": "other"})),
            TransformError::InvalidEnumInput {
                field: "gender".to_string(),
                value: "other".to_string()
            }
        );
    }

    #[test]
    fn test_missing_enum_table() {
        let out = transform(
            &fields(),
            &record(json!({"gender": "male"})),
            "teacher",
            &EnumDirectory::empty(),
            Direction::Write,
        );
        assert!(matches!(
            out,
            Err(Error::Transform(TransformError::EnumValuesEmpty { .. }))
        ));
    }

    #[test]
    fn test_date_reformat() {
        assert_eq!(
            write(json!({"dob": "2018-08-08"})).unwrap(),
            json!({"dateOfBirth": "08/08/2018"})
        );
        assert!(matches!(
            transform_error(json!({"dob": "08-08-2018"})),
            TransformError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_scalar_list_bridging() {
        let out = write(json!({"subject": "Math", "grades": [7, 9], "scores": ["1.5", "2"]})).unwrap();
        assert_eq!(out, json!({"subjects": ["Math"], "grade": 7, "scores": [1.5, 2.0]}));
    }

    #[test]
    fn test_list_destination_merges_sources() {
        let out = write(json!({"subject": "Math", "extraSubjects": ["Physics", "Art"]})).unwrap();
        let mut subjects: Vec<String> = out["subjects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap().to_string())
            .collect();
        subjects.sort();
        assert_eq!(subjects, vec!["Art", "Math", "Physics"]);
    }

    #[test]
    fn test_filter_demotion() {
        let out = write(json!({"externalIds": [
            {"provider": "P1", "id": "A"},
            {"provider": "P2", "id": "B"}
        ]}))
        .unwrap();
        assert_eq!(out, json!({"userId": "B"}));

        let out = write(json!({"externalIds": [{"provider": "P3", "id": "C"}]})).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_custom_list_recursion() {
        let out = write(json!({"addresses": [
            {"line1": "1 Main St", "pin": "411001", "unmapped": true},
            {"line1": "2 High St"}
        ]}))
        .unwrap();
        assert_eq!(
            out,
            json!({"addresses": [
                {"street": "1 Main St", "postal": {"code": 411001}},
                {"street": "2 High St"}
            ]})
        );
    }

    #[test]
    fn test_half_custom_list_is_type_config_error() {
        assert!(matches!(
            transform_error(json!({"badList": [{"line1": "x"}]})),
            TransformError::InvalidTypeConfig { ref field, .. } if field == "badList"
        ));
    }

    #[test]
    fn test_malformed_mapping_fails_only_when_used() {
        assert!(write(json!({"name": "Ada"})).is_ok());
        assert_eq!(
            transform_error(json!({"name": "Ada", "broken": "x"})),
            TransformError::BasicConfigMissing {
                field: "broken".to_string()
            }
        );
    }

    #[test]
    fn test_failure_returns_no_partial_output() {
        let err = write(json!({"name": "Ada", "grades": ["seven"]})).unwrap_err();
        assert_eq!(err.fault(), crate::error::Fault::Client);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_cyclic_schema_is_bounded() {
        let fields = FieldDirectory::from_value(json!({
            "Node": {
                "children": {"toFieldName": "children", "fromType": "List<Node>", "toType": "List<OutNode>"},
                "label": {"toFieldName": "label", "fromType": "String", "toType": "String"}
            }
        }))
        .unwrap();
        let enums = EnumDirectory::empty();

        let mut input = json!({"label": "leaf"});
        for _ in 0..4 {
            input = json!({"label": "node", "children": [input]});
        }
        let input = record(input);

        let shallow = Transformer::new(&fields, &enums).with_max_depth(2);
        assert!(matches!(
            shallow.transform(&input, "Node", Direction::Write),
            Err(Error::Transform(TransformError::InvalidTypeConfig { .. }))
        ));

        let deep = Transformer::new(&fields, &enums);
        assert!(DEFAULT_MAX_DEPTH > 4);
        let out = deep.transform(&input, "Node", Direction::Write).unwrap();
        assert_eq!(out["label"], json!("node"));
    }

    #[test]
    fn test_transform_value_requires_object() {
        let fields = fields();
        let enums = enums();
        let transformer = Transformer::new(&fields, &enums);
        assert!(matches!(
            transformer.transform_value(&json!(["Ada"]), "teacher", Direction::Write),
            Err(Error::Validation { .. })
        ));
        assert_eq!(
            transformer
                .transform_value(&json!({"name": "Ada"}), "teacher", Direction::Write)
                .unwrap(),
            json!({"name": "Ada"})
        );
    }

    #[test]
    fn test_directory_is_reusable_across_calls() {
        let fields = fields();
        let enums = enums();
        let transformer = Transformer::new(&fields, &enums);
        let first = transformer
            .transform(&record(json!({"name": "Ada"})), "teacher", Direction::Write)
            .unwrap();
        let second = transformer
            .transform(&record(json!({"name": "Grace"})), "teacher", Direction::Write)
            .unwrap();
        assert_eq!(first["name"], json!("Ada"));
        assert_eq!(second["name"], json!("Grace"));
        assert!(fields.lookup("teacher", "name").unwrap().unwrap().from_field.is_none());
    }
}
