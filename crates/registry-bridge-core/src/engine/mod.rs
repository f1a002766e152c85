//! Field mapping transformation engine
//!
//! The engine walks the keys of an input record, looks each one up in the
//! field directory under the requested schema and writes the converted value
//! into a fresh output record. Unconfigured keys and absent values are
//! skipped. Any configuration or input defect aborts the whole call and no
//! partial output is returned.
//!
//! Per field the engine either copies the raw value (identical types, no enum,
//! no date handling) or dispatches on cardinality:
//!
//! - scalar → scalar: [`coerce`]
//! - scalar → list, list → list, list → scalar: [`list`]
//! - list of records → list of records: recursion with the element type as
//!   the schema name
//!
//! Copyright (c) 2025 Registry Bridge Team
//! Licensed under the Apache-2.0 license

pub mod date;
pub mod extract;

mod coerce;
mod enums;
mod filter;
mod list;
mod output;
mod tests;

use crate::directory::{ElementType, EnumDirectory, FieldDirectory, FieldMapping};
use crate::error::{Error, Result, TransformError};
use crate::types::{is_blank, Direction, Record};
use coerce::{target_of, Coercion};
use serde_json::Value;

/// Default bound on nested custom-type recursion
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Transforms records according to a field directory and an enum directory.
///
/// Both directories are only borrowed, so one pair can back any number of
/// transformers on any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    fields: &'a FieldDirectory,
    enums: &'a EnumDirectory,
    max_depth: usize,
}

impl<'a> Transformer<'a> {
    pub fn new(fields: &'a FieldDirectory, enums: &'a EnumDirectory) -> Self {
        Self {
            fields,
            enums,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply custom list types may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Transform `input` using the mappings configured under `schema`
    pub fn transform(&self, input: &Record, schema: &str, direction: Direction) -> Result<Record> {
        tracing::info!(
            origin = self.fields.origin(),
            schema,
            %direction,
            "Transformation starts"
        );

        let output = self.transform_at(input, schema, direction, 0).map_err(|e| {
            tracing::error!(
                origin = self.fields.origin(),
                schema,
                field = e.field(),
                code = e.code(),
                error = %e,
                "Transformation failed"
            );
            Error::from(e)
        })?;

        tracing::info!(
            origin = self.fields.origin(),
            schema,
            %direction,
            fields = output.len(),
            "Transformation ends"
        );
        Ok(output)
    }

    /// Transform a JSON value, which must be an object
    pub fn transform_value(&self, input: &Value, schema: &str, direction: Direction) -> Result<Value> {
        let record = input
            .as_object()
            .ok_or_else(|| Error::validation("input", "record to transform must be a JSON object"))?;
        self.transform(record, schema, direction).map(Value::Object)
    }

    fn transform_at(
        &self,
        input: &Record,
        schema: &str,
        direction: Direction,
        depth: usize,
    ) -> std::result::Result<Record, TransformError> {
        let mut output = Record::new();

        for key in input.keys() {
            let mapping = match self.fields.lookup(schema, key) {
                Some(mapping) => mapping?,
                None => {
                    tracing::debug!(schema, field = %key, "Field not configured, skipping");
                    continue;
                }
            };

            let value = match extract::extract(input, mapping.source(key)) {
                Some(value) if !is_blank(&value) => value,
                _ => {
                    tracing::debug!(schema, field = %key, "No value to transform, skipping");
                    continue;
                }
            };

            if let Some(converted) = self.convert(key, mapping, &value, direction, depth)? {
                output::write(&mut output, &mapping.to_field, mapping.to_type.is_list(), converted);
            }
        }

        Ok(output)
    }

    fn convert(
        &self,
        field: &str,
        mapping: &FieldMapping,
        value: &Value,
        direction: Direction,
        depth: usize,
    ) -> std::result::Result<Option<Value>, TransformError> {
        if mapping.is_pass_through() {
            return Ok(Some(value.clone()));
        }

        let (from, to) = (&mapping.from_type, &mapping.to_type);
        if from.is_list() && to.is_list() && (from.is_custom_list() || to.is_custom_list()) {
            return self.map_custom_list(field, mapping, value, direction, depth);
        }

        let coercion = Coercion {
            field,
            mapping,
            table: enums::resolve(field, mapping, self.enums)?,
            direction,
        };
        let target = target_of(to);
        match (from.is_list(), to.is_list()) {
            (false, false) => coercion.apply(value, target),
            (false, true) => list::promote(&coercion, value, target),
            (true, true) => list::map_elements(&coercion, value, target),
            (true, false) => list::demote(&coercion, value, from.is_custom_list(), target),
        }
    }

    fn map_custom_list(
        &self,
        field: &str,
        mapping: &FieldMapping,
        value: &Value,
        direction: Direction,
        depth: usize,
    ) -> std::result::Result<Option<Value>, TransformError> {
        let schema = match (mapping.from_type.element(), mapping.to_type.element()) {
            (Some(ElementType::Custom(schema)), Some(ElementType::Custom(_))) => schema,
            _ => {
                tracing::error!(field, "Both sides of a custom list mapping must be custom types");
                return Err(TransformError::InvalidTypeConfig {
                    field: field.to_string(),
                    reason: format!(
                        "custom list mapping from {} to {} needs custom element types on both sides",
                        mapping.from_type, mapping.to_type
                    ),
                });
            }
        };

        if depth >= self.max_depth {
            return Err(TransformError::InvalidTypeConfig {
                field: field.to_string(),
                reason: format!(
                    "custom type '{}' nests deeper than {} levels",
                    schema, self.max_depth
                ),
            });
        }

        tracing::debug!(field, schema = %schema, depth = depth + 1, "Transforming custom list elements");
        list::map_records(field, value, |record| {
            self.transform_at(record, schema, direction, depth + 1)
        })
    }
}

/// Transform `input` in one call, with the default depth limit
pub fn transform(
    fields: &FieldDirectory,
    input: &Record,
    schema: &str,
    enums: &EnumDirectory,
    direction: Direction,
) -> Result<Record> {
    Transformer::new(fields, enums).transform(input, schema, direction)
}
