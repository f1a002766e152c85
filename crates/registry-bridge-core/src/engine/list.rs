//! Cardinality bridging between scalar and list types

use super::coerce::Coercion;
use super::filter;
use crate::directory::ScalarKind;
use crate::error::TransformError;
use crate::types::Record;
use serde_json::Value;

/// scalar → list: coerce against the element type and wrap
pub(crate) fn promote(
    coercion: &Coercion<'_>,
    value: &Value,
    target: Option<ScalarKind>,
) -> Result<Option<Value>, TransformError> {
    let element = coercion.apply(value, target)?.unwrap_or(Value::Null);
    Ok(Some(Value::Array(vec![element])))
}

/// list → list of scalars: coerce every element, keeping order
pub(crate) fn map_elements(
    coercion: &Coercion<'_>,
    value: &Value,
    target: Option<ScalarKind>,
) -> Result<Option<Value>, TransformError> {
    let items = expect_list(coercion.field, value)?;
    let mapped = items
        .iter()
        .map(|item| Ok(coercion.apply(item, target)?.unwrap_or(Value::Null)))
        .collect::<Result<Vec<_>, TransformError>>()?;
    Ok(Some(Value::Array(mapped)))
}

/// list → scalar: pick one element and coerce it.
///
/// Record lists go through the filter chain, plain lists take their first
/// element.
pub(crate) fn demote(
    coercion: &Coercion<'_>,
    value: &Value,
    records: bool,
    target: Option<ScalarKind>,
) -> Result<Option<Value>, TransformError> {
    let picked = if records {
        filter::select(coercion.field, coercion.mapping, value)?
    } else {
        expect_list(coercion.field, value)?.first().cloned()
    };
    match picked {
        Some(picked) => coercion.apply(&picked, target),
        None => Ok(None),
    }
}

/// list of records → list of records, each element mapped by `map_record`
pub(crate) fn map_records<F>(field: &str, value: &Value, mut map_record: F) -> Result<Option<Value>, TransformError>
where
    F: FnMut(&Record) -> Result<Record, TransformError>,
{
    let items = expect_list(field, value)?;
    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        let record = item.as_object().ok_or_else(|| TransformError::InvalidInput {
            field: field.to_string(),
            reason: "custom list elements must be records".to_string(),
        })?;
        mapped.push(Value::Object(map_record(record)?));
    }
    Ok(Some(Value::Array(mapped)))
}

fn expect_list<'a>(field: &str, value: &'a Value) -> Result<&'a Vec<Value>, TransformError> {
    value.as_array().ok_or_else(|| TransformError::InvalidInput {
        field: field.to_string(),
        reason: "expected a list value".to_string(),
    })
}
