//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//!
//! Command-line arguments are applied last by the handlers.

use crate::error::{Error, Result};
use registry_bridge_core::RegistryClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the registry base URL
pub const REGISTRY_URL_ENV: &str = "REGISTRY_BRIDGE_REGISTRY_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field and enum directory locations
    pub directories: DirectoryConfig,

    /// Registry connection settings
    pub registry: RegistryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Where the field and enum directories live
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Field directory used when writing to the registry
    pub write_fields: Option<PathBuf>,

    /// Field directory used when reading from the registry
    pub read_fields: Option<PathBuf>,

    /// Enum directory shared by both directions
    pub enums: Option<PathBuf>,
}

/// Registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the registry
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging defaults, overridden by `-v` and the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let defaults = RegistryClientConfig::default();
        Self {
            base_url: defaults.base_url,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

impl RegistryConfig {
    /// Client settings, with an optional base URL override
    pub fn client_config(&self, base_url: Option<&str>) -> RegistryClientConfig {
        RegistryClientConfig {
            base_url: base_url.unwrap_or(&self.base_url).to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "a .yaml, .json or .toml configuration file".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match ConfigFormat::from_path(path)? {
            ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Found configuration file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(REGISTRY_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.registry.base_url = url;
        }
    }

    /// Field directory configured for `write` or `read`
    pub fn fields_for(&self, write: bool) -> Option<&Path> {
        if write {
            self.directories.write_fields.as_deref()
        } else {
            self.directories.read_fields.as_deref()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("registry-bridge.yaml"),
            PathBuf::from("registry-bridge.json"),
            PathBuf::from("registry-bridge.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("registry-bridge");
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.json"));
            paths.push(app_dir.join("config.toml"));
        }

        paths
    }
}
