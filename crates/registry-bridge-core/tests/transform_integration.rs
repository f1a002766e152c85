//! Integration tests for directory loading and end-to-end transformation
//!
//! The fixtures describe a teacher profile written to, and read back from, a
//! registry schema.

use registry_bridge_core::{
    Direction, EnumDirectory, Error, FieldDirectory, Record, TransformError, Transformer,
};
use serde_json::{json, Value};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load() -> (FieldDirectory, FieldDirectory, EnumDirectory) {
    (
        FieldDirectory::from_path(fixture("user-write-mapping.yaml")).expect("write mapping loads"),
        FieldDirectory::from_path(fixture("user-read-mapping.yaml")).expect("read mapping loads"),
        EnumDirectory::from_path(fixture("user-enums.json")).expect("enums load"),
    )
}

fn profile() -> Record {
    let text = std::fs::read_to_string(fixture("teacher-profile.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_directories_record_their_origin() {
    let (write, read, enums) = load();
    assert_eq!(write.origin(), "user-write-mapping.yaml");
    assert_eq!(read.origin(), "user-read-mapping.yaml");
    assert_eq!(enums.origin(), "user-enums.json");
    assert_eq!(write.setting("sunbird.mainProvider"), Some(&json!("sunbird")));
}

#[test]
fn test_write_transformation() {
    let (write, _, enums) = load();
    let output = Transformer::new(&write, &enums)
        .transform(&profile(), "teacher", Direction::Write)
        .unwrap();

    assert_eq!(
        Value::Object(output),
        json!({
            "name": "Savitri Phule",
            "gender": "F",
            "birthDate": "03-01-1991",
            "contact": {"mobile": "9876543210"},
            "teachingDetails": {
                "subjects": ["Mathematics", "Physics", "Chemistry"],
                "experience": 12
            },
            "trained": true,
            "schoolId": "S-42",
            "addresses": [
                {"street": "12 Gandhi Road", "postal": {"code": 411001}, "addressType": "PERMANENT"},
                {"street": "4 Lake View", "addressType": "CURRENT"}
            ]
        })
    );
}

#[test]
fn test_read_transformation() {
    let (_, read, enums) = load();
    let stored = json!({
        "name": "Savitri Phule",
        "gender": "F",
        "birthDate": "03-01-1991",
        "teachingDetails": {"subjects": ["Mathematics", "Physics"]},
        "trained": true,
        "schoolId": "S-42"
    });

    let output = Transformer::new(&read, &enums)
        .transform_value(&stored, "teacher", Direction::Read)
        .unwrap();

    assert_eq!(
        output,
        json!({
            "firstName": "Savitri Phule",
            "gender": "female",
            "dob": "1991-01-03",
            "subjects": ["Mathematics", "Physics"],
            "isTrained": "yes"
        })
    );
}

#[test]
fn test_malformed_mapping_is_reported_by_directory() {
    let (write, _, _) = load();
    let invalid = write.invalid_mappings();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].0, "teacher");
    assert_eq!(
        invalid[0].1,
        &TransformError::BasicConfigMissing {
            field: "nickname".to_string()
        }
    );

    let (write, _, enums) = load();
    let mut input = profile();
    input.insert("nickname".to_string(), json!("Savi"));
    let err = Transformer::new(&write, &enums)
        .transform(&input, "teacher", Direction::Write)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Transform(TransformError::BasicConfigMissing { ref field }) if field == "nickname"
    ));
}

#[test]
fn test_bad_nested_enum_aborts_whole_call() {
    let (write, _, enums) = load();
    let mut input = profile();
    input.insert(
        "addresses".to_string(),
        json!([{"line1": "x", "type": "holiday"}]),
    );
    let err = Transformer::new(&write, &enums)
        .transform(&input, "teacher", Direction::Write)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Transform(TransformError::InvalidEnumInput { ref value, .. }) if value == "holiday"
    ));
}

#[test]
fn test_missing_file_is_configuration_error() {
    let err = FieldDirectory::from_path(fixture("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let err = EnumDirectory::from_path(fixture("teacher-profile.txt")).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_directory_shared_across_threads() {
    let (write, _, enums) = load();
    let write = std::sync::Arc::new(write);
    let enums = std::sync::Arc::new(enums);

    let handles: Vec<_> = ["Ada", "Grace", "Katherine"]
        .into_iter()
        .map(|name| {
            let write = write.clone();
            let enums = enums.clone();
            std::thread::spawn(move || {
                let input = json!({"firstName": name, "gender": "male"});
                Transformer::new(&write, &enums)
                    .transform_value(&input, "teacher", Direction::Write)
                    .unwrap()
            })
        })
        .collect();

    let names: Vec<Value> = handles
        .into_iter()
        .map(|h| h.join().unwrap()["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Ada"), json!("Grace"), json!("Katherine")]);
}
