//! Scalar coercion
//!
//! A single value is stringified, passed through the field's enum table when
//! one is configured, and then converted into the target scalar kind.

use super::{date, enums};
use crate::directory::{EnumTable, FieldMapping, ScalarKind, TypeExpr};
use crate::error::TransformError;
use crate::types::{stringify, Direction};
use serde_json::{Number, Value};
use std::str::FromStr;

/// Everything needed to coerce values of one field
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coercion<'a> {
    pub field: &'a str,
    pub mapping: &'a FieldMapping,
    pub table: Option<&'a EnumTable>,
    pub direction: Direction,
}

/// Scalar kind values are coerced into; `None` for custom types
pub(crate) fn target_of(ty: &TypeExpr) -> Option<ScalarKind> {
    match ty {
        TypeExpr::Scalar(kind) => Some(*kind),
        TypeExpr::List(element) => element.scalar_kind(),
        TypeExpr::Custom(_) => None,
    }
}

impl Coercion<'_> {
    /// Coerce one value; `Ok(None)` means there is nothing to write.
    ///
    /// A custom target keeps the original value untouched.
    pub fn apply(&self, value: &Value, target: Option<ScalarKind>) -> Result<Option<Value>, TransformError> {
        if value.is_null() {
            return Ok(None);
        }

        let mut text = stringify(value);
        if let Some(table) = self.table {
            text = enums::substitute(self.field, table, &text, self.direction)?;
        }

        let coerced = match target {
            None => value.clone(),
            Some(ScalarKind::String) => Value::String(text),
            Some(ScalarKind::Integer) => Value::from(self.parse_number::<i32>(&text, "Integer")?),
            Some(ScalarKind::Long) => Value::from(self.parse_number::<i64>(&text, "Long")?),
            Some(ScalarKind::Double) => {
                let number = self.parse_number::<f64>(&text, "Double")?;
                Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| self.invalid(&text, "Double"))?
            }
            Some(ScalarKind::Boolean) => Value::Bool(self.parse_bool(&text)?),
            Some(ScalarKind::DateString) => Value::String(date::reformat(
                self.field,
                &text,
                self.mapping.from_date_format.as_deref(),
                self.mapping.to_date_format.as_deref(),
            )?),
        };
        Ok(Some(coerced))
    }

    fn parse_number<N: FromStr>(&self, text: &str, kind: &str) -> Result<N, TransformError> {
        text.trim().parse::<N>().map_err(|_| self.invalid(text, kind))
    }

    fn parse_bool(&self, text: &str) -> Result<bool, TransformError> {
        match text.trim() {
            t if t.eq_ignore_ascii_case("true") => Ok(true),
            t if t.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.invalid(text, "Boolean")),
        }
    }

    fn invalid(&self, text: &str, kind: &str) -> TransformError {
        tracing::error!(field = self.field, value = text, kind, "Value cannot be coerced");
        TransformError::InvalidInput {
            field: self.field.to_string(),
            reason: format!("'{}' is not a valid {}", text, kind),
        }
    }
}
