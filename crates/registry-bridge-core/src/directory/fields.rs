//! The field directory
//!
//! Top-level keys are schema names. Each schema section maps field names to
//! mapping objects, which are compiled once when the directory is built.
//! Entries that are not objects are plain settings and stay reachable through
//! [`FieldDirectory::setting`].

use super::loader;
use super::mapping::FieldMapping;
use crate::error::{Error, Result, TransformError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

type Compiled = std::result::Result<FieldMapping, TransformError>;

/// Immutable, pre-compiled field directory
#[derive(Debug, Clone)]
pub struct FieldDirectory {
    origin: String,
    tree: Value,
    schemas: HashMap<String, HashMap<String, Compiled>>,
}

impl FieldDirectory {
    /// Build from a parsed tree.
    ///
    /// A malformed mapping does not fail the build: its error is kept and
    /// raised only when a record containing that field is transformed.
    pub fn from_value(tree: Value) -> Result<Self> {
        let Value::Object(root) = &tree else {
            return Err(Error::configuration(
                "field directory must be an object keyed by schema name",
            ));
        };

        let mut schemas = HashMap::new();
        for (schema, section) in root {
            let Value::Object(fields) = section else {
                continue;
            };
            let compiled: HashMap<String, Compiled> = fields
                .iter()
                .filter_map(|(field, raw)| {
                    raw.as_object()
                        .map(|raw| (field.clone(), FieldMapping::compile(field, raw)))
                })
                .collect();
            if !compiled.is_empty() {
                schemas.insert(schema.clone(), compiled);
            }
        }

        Ok(Self {
            origin: String::new(),
            tree,
            schemas,
        })
    }

    /// Load from a JSON or YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let directory = Self::from_value(loader::read_tree(path)?)?
            .with_origin(loader::origin_name(path));
        tracing::info!(
            origin = %directory.origin,
            schemas = directory.schemas.len(),
            "Loaded field directory"
        );
        Ok(directory)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// File the directory was loaded from, empty when built in memory
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Look up the mapping configured for `<schema>.<field>`.
    ///
    /// `None` means the field is not configured; a malformed mapping yields
    /// its compile error.
    pub fn lookup(&self, schema: &str, field: &str) -> Option<std::result::Result<&FieldMapping, TransformError>> {
        self.schemas
            .get(schema)?
            .get(field)
            .map(|compiled| compiled.as_ref().map_err(Clone::clone))
    }

    pub fn contains_schema(&self, schema: &str) -> bool {
        self.schemas.contains_key(schema)
    }

    /// Schema names, sorted
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Successfully compiled mappings of a schema, sorted by field name
    pub fn mappings(&self, schema: &str) -> Vec<(&str, &FieldMapping)> {
        let mut mappings: Vec<(&str, &FieldMapping)> = self
            .schemas
            .get(schema)
            .into_iter()
            .flatten()
            .filter_map(|(field, compiled)| compiled.as_ref().ok().map(|m| (field.as_str(), m)))
            .collect();
        mappings.sort_unstable_by_key(|(field, _)| *field);
        mappings
    }

    /// Every mapping that failed to compile, as `(schema, error)` sorted by location
    pub fn invalid_mappings(&self) -> Vec<(&str, &TransformError)> {
        let mut invalid: Vec<(&str, &TransformError)> = self
            .schemas
            .iter()
            .flat_map(|(schema, fields)| {
                fields
                    .values()
                    .filter_map(move |compiled| compiled.as_ref().err().map(|e| (schema.as_str(), e)))
            })
            .collect();
        invalid.sort_unstable_by(|a, b| (a.0, a.1.field()).cmp(&(b.0, b.1.field())));
        invalid
    }

    /// A plain setting addressed by a dotted path, e.g. `sunbird.mainProvider`
    pub fn setting(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.tree, |node, segment| node.as_object()?.get(segment))
    }
}
