//! Core data types shared by the directory, engine and registry modules

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A nested record: string keys mapping to scalars, lists or nested records
pub type Record = serde_json::Map<String, Value>;

/// Direction of a transformation
///
/// Enum tables are written in the `Write` orientation (external token to
/// internal token); `Read` uses them inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Outbound, profile to registry
    Write,
    /// Inbound, registry to profile
    Read,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Write => "WRITE",
            Direction::Read => "READ",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WRITE" => Ok(Direction::Write),
            "READ" => Ok(Direction::Read),
            other => Err(Error::validation(
                "direction",
                format!("unknown direction '{}', expected WRITE or READ", other),
            )),
        }
    }
}

/// Render a JSON value as the plain string the engine coerces from.
///
/// Strings are taken verbatim, other scalars use their JSON text and
/// containers are serialized.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `true` for absent-like values: null, a blank string or an empty list
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
