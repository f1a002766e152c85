//! Compiled field mappings
//!
//! One [`FieldMapping`] describes how a single source field is written into
//! the destination record. Mappings are compiled from the raw directory tree
//! once; the engine only ever reads them.

use super::enums::EnumTable;
use super::type_expr::TypeExpr;
use crate::error::TransformError;
use crate::types::stringify;
use serde_json::{Map, Value};

/// Keys of a mapping object in the field directory
pub mod keys {
    pub const FROM_FIELD_NAME: &str = "fromFieldName";
    pub const TO_FIELD_NAME: &str = "toFieldName";
    pub const FROM_TYPE: &str = "fromType";
    pub const TO_TYPE: &str = "toType";
    pub const ENUM: &str = "enum";
    pub const FROM_DATE_FORMAT: &str = "fromDateFormat";
    pub const TO_DATE_FORMAT: &str = "toDateFormat";
    pub const FILTERS: &str = "filters";
    pub const FILTER_FIELD: &str = "filterField";
    pub const FIELD: &str = "field";
    pub const VALUES: &str = "values";
}

/// Where a mapping reads its value from
#[derive(Debug, Clone, PartialEq)]
pub enum FromField {
    /// A single dotted path
    Single(String),
    /// Several dotted paths whose values are joined with a single space
    Joined(Vec<String>),
}

/// Borrowed view of the effective source of a mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source<'a> {
    Single(&'a str),
    Joined(&'a [String]),
}

/// Reference to an enum table
#[derive(Debug, Clone, PartialEq)]
pub enum EnumRef {
    /// Resolved against the enum directory at `enums.<name>`
    Named(String),
    /// A table embedded in the mapping itself
    Inline(EnumTable),
}

/// One rule of a filter chain: keep records whose `field` is one of `values`.
///
/// Rules are kept as configured; a blank field or empty value list is
/// reported when the rule is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRule {
    pub field: String,
    pub values: Vec<Value>,
}

/// A compiled field mapping
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    /// Explicit source; `None` means the field's own key
    pub from_field: Option<FromField>,
    /// Dotted destination path
    pub to_field: String,
    pub from_type: TypeExpr,
    pub to_type: TypeExpr,
    pub enum_ref: Option<EnumRef>,
    pub from_date_format: Option<String>,
    pub to_date_format: Option<String>,
    /// `None` when not configured, `Some` (possibly empty) otherwise
    pub filters: Option<Vec<FilterRule>>,
    pub filter_field: Option<String>,
}

impl FieldMapping {
    /// Compile the raw mapping object configured for `field`
    pub fn compile(field: &str, raw: &Map<String, Value>) -> Result<Self, TransformError> {
        let basic = |key: &str| non_blank(raw.get(key));
        let (to_field, from_type, to_type) = match (
            basic(keys::TO_FIELD_NAME),
            basic(keys::FROM_TYPE),
            basic(keys::TO_TYPE),
        ) {
            (Some(to_field), Some(from_type), Some(to_type)) => (to_field, from_type, to_type),
            _ => {
                return Err(TransformError::BasicConfigMissing {
                    field: field.to_string(),
                })
            }
        };

        let parse_type = |raw_type: &str| {
            TypeExpr::parse(raw_type).map_err(|reason| TransformError::InvalidTypeConfig {
                field: field.to_string(),
                reason,
            })
        };

        Ok(Self {
            from_field: compile_from_field(raw.get(keys::FROM_FIELD_NAME)),
            to_field,
            from_type: parse_type(&from_type)?,
            to_type: parse_type(&to_type)?,
            enum_ref: raw.get(keys::ENUM).and_then(compile_enum_ref),
            from_date_format: non_blank(raw.get(keys::FROM_DATE_FORMAT)),
            to_date_format: non_blank(raw.get(keys::TO_DATE_FORMAT)),
            filters: raw.get(keys::FILTERS).map(compile_filters),
            filter_field: non_blank(raw.get(keys::FILTER_FIELD)),
        })
    }

    /// The effective source, defaulting to the field's own key.
    ///
    /// The mapping itself is left untouched so that one directory can serve
    /// any number of concurrent transformations.
    pub fn source<'a>(&'a self, key: &'a str) -> Source<'a> {
        match &self.from_field {
            Some(FromField::Single(path)) => Source::Single(path),
            Some(FromField::Joined(paths)) => Source::Joined(paths),
            None => Source::Single(key),
        }
    }

    pub fn has_enum(&self) -> bool {
        self.enum_ref.is_some()
    }

    /// Identical types, no enum and no date handling: the raw value is copied
    pub fn is_pass_through(&self) -> bool {
        self.from_type.same_as(&self.to_type) && !self.has_enum() && !self.from_type.is_date()
    }

    /// Name of the referenced enum table, if it is a named reference
    pub fn enum_name(&self) -> Option<&str> {
        match &self.enum_ref {
            Some(EnumRef::Named(name)) => Some(name),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn compile_from_field(value: Option<&Value>) -> Option<FromField> {
    match value? {
        Value::String(path) if !path.trim().is_empty() => {
            Some(FromField::Single(path.trim().to_string()))
        }
        Value::Array(paths) => Some(FromField::Joined(
            paths
                .iter()
                .filter_map(|p| p.as_str())
                .map(|p| p.trim().to_string())
                .collect(),
        )),
        _ => None,
    }
}

fn compile_enum_ref(value: &Value) -> Option<EnumRef> {
    match value {
        Value::Null => None,
        Value::String(name) => Some(EnumRef::Named(name.trim().to_string())),
        Value::Object(entries) => Some(EnumRef::Inline(EnumTable::from_object(entries))),
        // Neither a name nor a table: resolves to nothing and is reported as missing values
        other => Some(EnumRef::Named(stringify(other))),
    }
}

fn compile_filters(value: &Value) -> Vec<FilterRule> {
    let Some(rules) = value.as_array() else {
        return Vec::new();
    };
    rules
        .iter()
        .map(|rule| FilterRule {
            field: rule
                .get(keys::FIELD)
                .and_then(Value::as_str)
                .map(|f| f.trim().to_string())
                .unwrap_or_default(),
            values: rule
                .get(keys::VALUES)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}
