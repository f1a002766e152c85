// Tests for output formatting
//
// These cover the message helpers per format and the check report rendering.

use super::*;
use crate::handlers::check::{Problem, SchemaSummary};
use serde_json::json;

fn report(problems: Vec<Problem>) -> CheckReport {
    CheckReport {
        fields_origin: "write-mapping.yaml".to_string(),
        enums_origin: Some("enums.json".to_string()),
        schemas: vec![SchemaSummary {
            schema: "teacher".to_string(),
            mappings: 3,
        }],
        problems,
        warnings: vec!["enum 'board' maps several tokens to the same value".to_string()],
    }
}

#[test]
fn test_human_messages() {
    let (mut output, buffer) = capture(OutputFormat::Human);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.warning("careful").unwrap();

    assert_eq!(buffer.contents(), "INFO: loading\ndone\nWARNING: careful\n");
}

#[test]
fn test_machine_formats_only_carry_data() {
    let (mut output, buffer) = capture(OutputFormat::Json);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.data(&json!({"name": "Asha", "subjects": ["Math"]})).unwrap();

    assert_eq!(buffer.contents(), "{\"name\":\"Asha\",\"subjects\":[\"Math\"]}\n");
}

#[test]
fn test_yaml_data() {
    let (mut output, buffer) = capture(OutputFormat::Yaml);
    output.data(&json!({"name": "Asha"})).unwrap();
    assert_eq!(buffer.contents(), "name: Asha\n");
}

#[test]
fn test_quiet_suppresses_chatter_but_not_data() {
    let buffer = SharedBuffer::default();
    let mut output = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.data(&json!({"a": 1})).unwrap();

    assert_eq!(buffer.contents(), "{\n  \"a\": 1\n}\n");
}

#[test]
fn test_check_report_human() {
    let formatted = format_check_report_human(&report(vec![Problem {
        schema: "teacher".to_string(),
        field: "gender".to_string(),
        code: "ENUM_VALUES_EMPTY",
        message: "enum values are missing in the configuration for field 'gender'".to_string(),
    }]));

    assert!(formatted.contains("Field directory: write-mapping.yaml"));
    assert!(formatted.contains("Enum directory: enums.json"));
    assert!(formatted.contains("teacher (3 mapping(s))"));
    assert!(formatted.contains("Warnings (1):"));
    assert!(formatted.contains("✗ Problems (1):"));
    assert!(formatted.contains("teacher.gender [ENUM_VALUES_EMPTY]"));
}

#[test]
fn test_check_report_clean_and_json() {
    let clean = report(Vec::new());
    assert!(format_check_report_human(&clean).contains("✓ No problems found"));

    let formatted = OutputFormat::Json.format_check_report(&clean).unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value["schemas"][0]["schema"], "teacher");
    assert_eq!(value["problems"], json!([]));
}
