//! Check command handler
//!
//! Finds configuration mistakes before a record ever hits them: mappings
//! that failed to compile, enum references without a table, unusable date
//! patterns and custom lists whose element schema is missing.

use super::utils::load_enums;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use registry_bridge_core::directory::ElementType;
use registry_bridge_core::engine::date::DatePattern;
use registry_bridge_core::{EnumDirectory, FieldDirectory, FieldMapping, TransformError};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Outcome of checking a field directory against an enum directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub fields_origin: String,
    pub enums_origin: Option<String>,
    pub schemas: Vec<SchemaSummary>,
    /// Defects that make a transformation fail
    pub problems: Vec<Problem>,
    /// Oddities that do not fail a transformation
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaSummary {
    pub schema: String,
    pub mappings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub schema: String,
    pub field: String,
    pub code: &'static str,
    pub message: String,
}

impl Problem {
    fn from_error(schema: &str, error: &TransformError) -> Self {
        Self {
            schema: schema.to_string(),
            field: error.field().to_string(),
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Handle the check command
#[instrument(skip(_config, output), fields(fields = %args.fields.display()))]
pub async fn handle_check(args: CheckArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("check_command");

    output.info(&format!("Checking {}", args.fields.display()))?;
    let fields = FieldDirectory::from_path(&args.fields)?;
    let enums = load_enums(args.enums.as_deref())?;

    let mut report = check_directories(&fields, &enums);
    report.enums_origin = args.enums.as_ref().map(|_| enums.origin().to_string());
    info!(
        problems = report.problems.len(),
        warnings = report.warnings.len(),
        "Directory check finished"
    );

    output.check_report(&report)?;

    if report.problems.is_empty() {
        Ok(())
    } else {
        Err(Error::CheckFailed {
            problems: report.problems.len(),
        })
    }
}

/// Check every schema of `fields`
pub fn check_directories(fields: &FieldDirectory, enums: &EnumDirectory) -> CheckReport {
    let mut report = CheckReport {
        fields_origin: fields.origin().to_string(),
        ..CheckReport::default()
    };

    report.problems.extend(
        fields
            .invalid_mappings()
            .into_iter()
            .map(|(schema, error)| Problem::from_error(schema, error)),
    );

    for schema in fields.schema_names() {
        let mappings = fields.mappings(schema);
        report.schemas.push(SchemaSummary {
            schema: schema.to_string(),
            mappings: mappings.len(),
        });
        for (field, mapping) in mappings {
            check_mapping(schema, field, mapping, fields, enums, &mut report);
        }
    }

    let mut lossy: Vec<&str> = enums
        .names()
        .filter(|name| enums.table(name).is_some_and(|table| !table.is_bijective()))
        .collect();
    lossy.sort_unstable();
    for name in lossy {
        warn!(enum_name = name, "Enum table maps several tokens to one value");
        report.warnings.push(format!(
            "enum '{}' maps several tokens to the same value; reading it back is lossy",
            name
        ));
    }

    report
}

fn check_mapping(
    schema: &str,
    field: &str,
    mapping: &FieldMapping,
    fields: &FieldDirectory,
    enums: &EnumDirectory,
    report: &mut CheckReport,
) {
    let mut errors = Vec::new();

    if let Some(name) = mapping.enum_name() {
        if !enums.contains(name) {
            errors.push(TransformError::EnumValuesEmpty {
                field: field.to_string(),
            });
        }
    }

    if mapping.from_type.is_date() || mapping.to_type.is_date() {
        let patterns = [mapping.from_date_format.as_deref(), mapping.to_date_format.as_deref()];
        let usable = patterns
            .into_iter()
            .all(|pattern| pattern.is_some_and(|p| DatePattern::compile(p).is_ok()));
        if !usable {
            errors.push(TransformError::InvalidDateFormat {
                field: field.to_string(),
            });
        }
    }

    match (mapping.from_type.element(), mapping.to_type.element()) {
        (Some(ElementType::Custom(element)), Some(ElementType::Custom(_))) => {
            if !fields.contains_schema(element) {
                report.warnings.push(format!(
                    "{}.{}: element schema '{}' is not configured; its fields will be skipped",
                    schema, field, element
                ));
            }
        }
        (Some(from), Some(to)) if from.is_custom() != to.is_custom() => {
            errors.push(TransformError::InvalidTypeConfig {
                field: field.to_string(),
                reason: format!(
                    "custom list mapping from {} to {} needs custom element types on both sides",
                    mapping.from_type, mapping.to_type
                ),
            });
        }
        _ => {}
    }

    report
        .problems
        .extend(errors.iter().map(|error| Problem::from_error(schema, error)));
}
