//! Directory file loading for YAML and JSON formats
//!
//! Copyright (c) 2025 Registry Bridge Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for directory files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(Error::configuration(format!(
                "unsupported directory file format: {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Parse content in this format into a JSON tree
    pub fn parse(&self, content: &str) -> std::result::Result<Value, anyhow::Error> {
        match self {
            Format::Yaml => Ok(serde_yaml::from_str(content)?),
            Format::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Read and parse a directory file, detecting the format from its extension
pub fn read_tree(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    tracing::debug!(path = %path.display(), ?format, "Loading directory file");

    let content = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
        message: format!("failed to read {}", path.display()),
        source: Some(e.into()),
    })?;

    format.parse(&content).map_err(|e| Error::Configuration {
        message: format!("failed to parse {}", path.display()),
        source: Some(e),
    })
}

/// File name without directories, used to identify a directory in logs
pub fn origin_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
