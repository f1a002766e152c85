//! Enum tables and the enum directory
//!
//! A table maps external tokens (keys) to internal tokens (values) in the
//! write orientation. The read orientation is the inverted table, built once
//! when the table is created.

use super::loader;
use crate::error::{Error, Result};
use crate::types::{stringify, Direction};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Root key of the enum directory
pub const ENUMS_ROOT: &str = "enums";

/// A value substitution table usable in both directions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumTable {
    forward: BTreeMap<String, String>,
    inverse: BTreeMap<String, String>,
}

impl EnumTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        let mut inverse = BTreeMap::new();
        for (key, value) in &entries {
            if let Some(kept) = inverse.get(value) {
                // Keys iterate in lexical order, so the first key wins
                log::warn!(
                    "Enum value '{}' is mapped from both '{}' and '{}'; reading keeps '{}'",
                    value,
                    kept,
                    key,
                    kept
                );
                continue;
            }
            inverse.insert(value.clone(), key.clone());
        }
        Self {
            forward: entries,
            inverse,
        }
    }

    /// Build a table from a raw object, stringifying non-string values
    pub fn from_object(entries: &Map<String, Value>) -> Self {
        Self::new(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), stringify(value)))
                .collect(),
        )
    }

    /// Substitute a token.
    ///
    /// Matching against the oriented table's keys ignores case; an exact match
    /// is preferred when keys differ only by case.
    pub fn lookup(&self, token: &str, direction: Direction) -> Option<&str> {
        let table = self.oriented(direction);
        if let Some(value) = table.get(token) {
            return Some(value);
        }
        let lowered = token.to_lowercase();
        table
            .iter()
            .find(|(key, _)| key.to_lowercase() == lowered)
            .map(|(_, value)| value.as_str())
    }

    /// Tokens accepted in the given direction
    pub fn accepted(&self, direction: Direction) -> impl Iterator<Item = &str> {
        self.oriented(direction).keys().map(String::as_str)
    }

    /// `false` when several keys share a value and reading is lossy
    pub fn is_bijective(&self) -> bool {
        self.forward.len() == self.inverse.len()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn oriented(&self, direction: Direction) -> &BTreeMap<String, String> {
        match direction {
            Direction::Write => &self.forward,
            Direction::Read => &self.inverse,
        }
    }
}

/// Named enum tables, addressed as `enums.<name>`
#[derive(Debug, Clone, Default)]
pub struct EnumDirectory {
    origin: String,
    tables: HashMap<String, EnumTable>,
}

impl EnumDirectory {
    /// A directory without any tables
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a parsed tree of the form `{"enums": {"<name>": {...}}}`
    pub fn from_value(tree: Value) -> Result<Self> {
        let Value::Object(mut root) = tree else {
            return Err(Error::configuration(
                "enum directory must be an object with an 'enums' section",
            ));
        };

        let tables = match root.remove(ENUMS_ROOT) {
            Some(Value::Object(sections)) => sections
                .into_iter()
                .filter_map(|(name, table)| match table {
                    Value::Object(entries) => Some((name, EnumTable::from_object(&entries))),
                    _ => {
                        tracing::debug!(enum_name = %name, "Ignoring non-table enum entry");
                        None
                    }
                })
                .collect(),
            Some(_) => {
                return Err(Error::configuration(format!(
                    "'{}' section of the enum directory must be an object",
                    ENUMS_ROOT
                )))
            }
            None => HashMap::new(),
        };

        Ok(Self {
            origin: String::new(),
            tables,
        })
    }

    /// Load from a JSON or YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let directory = Self::from_value(loader::read_tree(path)?)?;
        tracing::info!(
            origin = %loader::origin_name(path),
            tables = directory.tables.len(),
            "Loaded enum directory"
        );
        Ok(directory.with_origin(loader::origin_name(path)))
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// File the directory was loaded from, empty when built in memory
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn table(&self, name: &str) -> Option<&EnumTable> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
