//! Transform command handler

use super::utils::{load_enums, read_record, resolve_path, save_value};
use crate::cli::{DirectionArg, TransformArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use registry_bridge_core::{Direction, FieldDirectory, Transformer};
use serde_json::Value;
use tracing::{info, instrument};

/// Handle the transform command
#[instrument(skip(config, output), fields(input = %args.input.display(), schema = %args.schema))]
pub async fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("transform_command", &args.schema);

    if args.schema.trim().is_empty() {
        return Err(Error::invalid_args("--schema must not be blank"));
    }

    let direction = Direction::from(args.direction);
    let fields_path = resolve_path(
        args.fields.as_deref(),
        config.fields_for(args.direction == DirectionArg::Write),
        "field directory",
    )?;
    let fields = FieldDirectory::from_path(&fields_path)?;
    let enums = load_enums(args.enums.as_deref().or(config.directories.enums.as_deref()))?;

    if !fields.contains_schema(&args.schema) {
        output.warning(&format!(
            "Schema '{}' is not configured in {}; every field will be skipped",
            args.schema,
            fields.origin()
        ))?;
    }

    output.info(&format!(
        "Transforming {} with {} ({})",
        args.input.display(),
        fields.origin(),
        direction.as_str()
    ))?;
    let record = read_record(&args.input)?;
    info!(fields = record.len(), direction = direction.as_str(), "Transforming record");

    let mut transformer = Transformer::new(&fields, &enums);
    if let Some(max_depth) = args.max_depth {
        transformer = transformer.with_max_depth(max_depth);
    }
    let transformed = Value::Object(transformer.transform(&record, &args.schema, direction)?);

    output.data(&transformed)?;

    if let Some(path) = &args.save_to {
        save_value(path, &transformed)?;
        output.success(&format!("✓ Output saved to {}", path.display()))?;
    }

    Ok(())
}
