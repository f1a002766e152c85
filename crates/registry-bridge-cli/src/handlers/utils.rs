//! Shared utilities for command handlers

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::output::OutputFormatter;
use registry_bridge_core::{EnumDirectory, Record};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path meaning "read from stdin"
pub const STDIN: &str = "-";

/// Read a record from a JSON or YAML file, or from stdin for `-`
pub fn read_record(path: &Path) -> Result<Record> {
    let (content, yaml) = if path == Path::new(STDIN) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        (content, false)
    } else {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        (fs::read_to_string(path)?, is_yaml(path))
    };
    debug!(source = %path.display(), bytes = content.len(), "Read input record");

    parse_record(&content, yaml).ok_or_else(|| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: if yaml { "a YAML mapping" } else { "a JSON object" }.to_string(),
    })
}

/// Parse a record; stdin accepts either JSON or YAML
fn parse_record(content: &str, yaml: bool) -> Option<Record> {
    let value: Value = if yaml {
        serde_yaml::from_str(content).ok()?
    } else {
        serde_json::from_str(content)
            .ok()
            .or_else(|| serde_yaml::from_str(content).ok())?
    };
    match value {
        Value::Object(record) => Some(record),
        _ => None,
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Pick the command-line path, falling back to the configured one
pub fn resolve_path(flag: Option<&Path>, configured: Option<&Path>, what: &str) -> Result<PathBuf> {
    flag.or(configured).map(Path::to_path_buf).ok_or_else(|| {
        Error::config(format!(
            "no {} given; pass it on the command line or set it in the configuration file",
            what
        ))
    })
}

/// Load the enum directory, or an empty one when none is configured
pub fn load_enums(path: Option<&Path>) -> Result<EnumDirectory> {
    match path {
        Some(path) => Ok(EnumDirectory::from_path(path)?),
        None => {
            debug!("No enum directory configured");
            Ok(EnumDirectory::empty())
        }
    }
}

/// Save a value to a file, YAML for `.yaml`/`.yml` paths and pretty JSON otherwise
pub fn save_value(path: &Path, value: &Value) -> Result<()> {
    let format = if is_yaml(path) {
        OutputFormat::Yaml
    } else {
        OutputFormat::JsonPretty
    };
    fs::write(path, format.format(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_read_json_and_yaml_records() {
        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file.write_all(br#"{"firstName": "Asha"}"#).unwrap();
        let record = read_record(json_file.path()).unwrap();
        assert_eq!(record.get("firstName"), Some(&json!("Asha")));

        let mut yaml_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml_file.write_all(b"gender: M\nage: 41\n").unwrap();
        let record = read_record(yaml_file.path()).unwrap();
        assert_eq!(record.get("age"), Some(&json!(41)));
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"[1, 2]").unwrap();
        assert!(matches!(read_record(file.path()), Err(Error::InvalidFormat { .. })));
        assert!(matches!(
            read_record(Path::new("/nonexistent/profile.json")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_stdin_content_may_be_yaml() {
        assert!(parse_record("{\"a\": 1}", false).is_some());
        assert!(parse_record("a: 1", false).is_some());
        assert!(parse_record("just text", false).is_none());
    }

    #[test]
    fn test_resolve_path() {
        let configured = Path::new("configured.yaml");
        assert_eq!(
            resolve_path(Some(Path::new("flag.yaml")), Some(configured), "field directory").unwrap(),
            PathBuf::from("flag.yaml")
        );
        assert_eq!(
            resolve_path(None, Some(configured), "field directory").unwrap(),
            PathBuf::from("configured.yaml")
        );
        assert!(matches!(resolve_path(None, None, "field directory"), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yaml");
        save_value(&path, &json!({"name": "Asha"})).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name: Asha\n");
    }
}
