//! Filter selection for list-to-scalar demotion of record lists

use crate::directory::{FieldMapping, FilterRule};
use crate::error::TransformError;
use crate::types::Record;
use serde_json::Value;

/// Narrow a list of records with the mapping's filter chain and return the
/// `filterField` value of the first remaining record.
///
/// `Ok(None)` when no record survives the filters or the survivor lacks the
/// field.
pub(crate) fn select(
    field: &str,
    mapping: &FieldMapping,
    value: &Value,
) -> Result<Option<Value>, TransformError> {
    let invalid_config = |reason: &str| {
        tracing::error!(field, reason, "Invalid filter configuration");
        TransformError::InvalidFilterConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    };

    let rules = match mapping.filters.as_deref() {
        Some(rules) if !rules.is_empty() => rules,
        _ => return Err(invalid_config("filters are missing or empty")),
    };
    let filter_field = mapping
        .filter_field
        .as_deref()
        .ok_or_else(|| invalid_config("filterField is missing or blank"))?;

    let mut candidates = records(field, value)?;
    for rule in rules {
        if rule.field.is_empty() || rule.values.is_empty() {
            return Err(invalid_config("filter rule needs a field and at least one value"));
        }
        candidates.retain(|record| matches(rule, record));
    }

    Ok(candidates
        .first()
        .and_then(|record| record.get(filter_field))
        .cloned())
}

fn matches(rule: &FilterRule, record: &Record) -> bool {
    let value = record.get(&rule.field).unwrap_or(&Value::Null);
    rule.values.contains(value)
}

fn records<'a>(field: &str, value: &'a Value) -> Result<Vec<&'a Record>, TransformError> {
    let invalid_input = |reason: &str| TransformError::InvalidInput {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let items = value
        .as_array()
        .filter(|items| !items.is_empty())
        .ok_or_else(|| invalid_input("expected a non-empty list of records to filter"))?;
    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| invalid_input("filtered list elements must be records"))
        })
        .collect()
}
