//! Enum resolution and substitution

use crate::directory::{EnumDirectory, EnumRef, EnumTable, FieldMapping};
use crate::error::TransformError;
use crate::types::Direction;

/// Resolve the enum table a mapping refers to.
///
/// Returns `None` when no enum is configured and `EnumValuesEmpty` when a
/// named table cannot be found.
pub(crate) fn resolve<'a>(
    field: &str,
    mapping: &'a FieldMapping,
    enums: &'a EnumDirectory,
) -> Result<Option<&'a EnumTable>, TransformError> {
    match &mapping.enum_ref {
        None => Ok(None),
        Some(EnumRef::Inline(table)) => Ok(Some(table)),
        Some(EnumRef::Named(name)) => match enums.table(name) {
            Some(table) => Ok(Some(table)),
            None => {
                tracing::error!(field, enum_name = %name, "Enum values missing in the enum directory");
                Err(TransformError::EnumValuesEmpty {
                    field: field.to_string(),
                })
            }
        },
    }
}

/// Substitute `token` through `table` in the given direction
pub(crate) fn substitute(
    field: &str,
    table: &EnumTable,
    token: &str,
    direction: Direction,
) -> Result<String, TransformError> {
    match table.lookup(token, direction) {
        Some(value) => Ok(value.to_string()),
        None => {
            tracing::error!(field, token, %direction, "Enum value not configured");
            Err(TransformError::InvalidEnumInput {
                field: field.to_string(),
                value: token.to_string(),
            })
        }
    }
}
