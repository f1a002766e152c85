//! Registry command handler

use super::utils::{load_enums, read_record, resolve_path};
use crate::cli::{RegistryAction, RegistryArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use registry_bridge_core::registry::user::keys;
use registry_bridge_core::{FieldDirectory, HttpRegistryClient, RegistryTransport, UserRegistry};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Handle the registry command
#[instrument(skip_all, fields(action = action_name(&args.action)))]
pub async fn handle_registry(args: RegistryArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("registry_command", action_name(&args.action));

    let token = args
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(Error::TokenMissing)?
        .to_string();
    debug!(token = %redaction::mask_token(&token), "Using access token");

    let client_config = config.registry.client_config(args.registry_url.as_deref());
    info!(base_url = %client_config.base_url, "Connecting to registry");
    let client = HttpRegistryClient::new(client_config)?;

    let registry = build_registry(client, &args, config)?;
    run_action(&registry, args.action, &token, output).await
}

/// Load the directories the action needs; the others stay empty
fn build_registry<T: RegistryTransport>(transport: T, args: &RegistryArgs, config: &Config) -> Result<UserRegistry<T>> {
    let (needs_write, needs_read) = match &args.action {
        RegistryAction::Create { .. } | RegistryAction::Update { .. } => (true, false),
        RegistryAction::Read { .. } => (false, true),
        RegistryAction::Delete { .. } => (false, false),
    };

    let write_fields = load_fields(
        needs_write,
        args.write_fields.as_deref(),
        config.directories.write_fields.as_deref(),
        "write field directory",
    )?;
    let read_fields = load_fields(
        needs_read,
        args.read_fields.as_deref(),
        config.directories.read_fields.as_deref(),
        "read field directory",
    )?;
    let enums = if needs_write || needs_read {
        load_enums(args.enums.as_deref().or(config.directories.enums.as_deref()))?
    } else {
        load_enums(None)?
    };

    Ok(UserRegistry::new(
        transport,
        Arc::new(write_fields),
        Arc::new(read_fields),
        Arc::new(enums),
    ))
}

fn load_fields(needed: bool, flag: Option<&Path>, configured: Option<&Path>, what: &str) -> Result<FieldDirectory> {
    if !needed {
        return Ok(FieldDirectory::from_value(Value::Object(Map::new()))?);
    }
    let path = resolve_path(flag, configured, what)?;
    Ok(FieldDirectory::from_path(path)?)
}

/// Run one registry action and report its result
pub async fn run_action<T: RegistryTransport>(
    registry: &UserRegistry<T>,
    action: RegistryAction,
    token: &str,
    output: &mut OutputWriter,
) -> Result<()> {
    match action {
        RegistryAction::Create { profile } => {
            let profile = read_record(&profile)?;
            let registry_id = registry.create(&profile, token).await?;
            output.success(&format!("✓ Created registry entity {}", registry_id))?;
            output.data(&json!({ (keys::REGISTRY_ID): registry_id }))?;
        }
        RegistryAction::Read { id, user_type } => {
            let profile = registry.read(&id, &user_type, token).await?;
            output.data(&Value::Object(profile))?;
        }
        RegistryAction::Update { id, profile } => {
            let profile = read_record(&profile)?;
            registry.update(&profile, &id, token).await?;
            output.success(&format!("✓ Updated registry entity {}", id))?;
            output.data(&json!({ (keys::REGISTRY_ID): id }))?;
        }
        RegistryAction::Delete { id } => {
            registry.delete(&id, token).await?;
            output.success(&format!("✓ Deleted registry entity {}", id))?;
            output.data(&json!({ (keys::REGISTRY_ID): id }))?;
        }
    }
    Ok(())
}

fn action_name(action: &RegistryAction) -> &'static str {
    match action {
        RegistryAction::Create { .. } => "create",
        RegistryAction::Read { .. } => "read",
        RegistryAction::Update { .. } => "update",
        RegistryAction::Delete { .. } => "delete",
    }
}
