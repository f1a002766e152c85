//! Error types and handling for the CLI
//!
//! Exit codes follow the error kind: bad input from the caller, broken
//! configuration, and I/O or registry trouble each get their own range.

use registry_bridge_core::{Fault, TransformError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, stdin, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from registry-bridge-core
    #[error("{0}")]
    Core(#[from] registry_bridge_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file is not in the expected format
    #[error("Invalid file format for {}: expected {}", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Registry commands need an access token
    #[error("Access token required. Set via --token or REGISTRY_BRIDGE_TOKEN")]
    TokenMissing,

    /// `check` found problems in the directories
    #[error("Directory check found {} problem(s)", problems)]
    CheckFailed { problems: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl From<TransformError> for Error {
    fn from(err: TransformError) -> Self {
        Self::Core(err.into())
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(err) => core_exit_code(err),
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::TokenMissing => 6,
            Self::CheckFailed { .. } => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_) | Self::TokenMissing)
    }
}

fn core_exit_code(err: &registry_bridge_core::Error) -> i32 {
    use registry_bridge_core::Error as Core;

    match err {
        Core::Transform(transform) => match transform.fault() {
            Fault::Client => 2,
            Fault::Server => 5,
        },
        Core::Validation { .. } => 2,
        Core::Configuration { .. } => 5,
        Core::Io { .. } => 1,
        Core::Http { .. } => 10,
        Core::Registry { .. } => 11,
        Core::Json { .. } => 12,
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let detail = match error {
        Error::Core(registry_bridge_core::Error::Transform(transform)) => {
            format!("{} [{}]", error, transform.code())
        }
        _ => error.to_string(),
    };

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), detail)
    } else {
        format!("Error: {}", detail)
    }
}
