//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use registry_bridge_core::Direction;
use std::path::PathBuf;

/// Registry Bridge - map user profiles to and from registry entities
///
/// Transforms records with field and enum directories, checks directories
/// for configuration mistakes, and drives the user registry over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "registry-bridge",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "REGISTRY_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a record with a field directory
    Transform(TransformArgs),

    /// Check field and enum directories for configuration mistakes
    Check(CheckArgs),

    /// Create, read, update or delete user profiles in the registry
    Registry(RegistryArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Input record (JSON or YAML file, `-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field directory (defaults to the configured one for the direction)
    #[arg(short, long, value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Enum directory (defaults to the configured one)
    #[arg(short, long, value_name = "FILE")]
    pub enums: Option<PathBuf>,

    /// Schema section of the field directory to apply
    #[arg(short, long)]
    pub schema: String,

    /// Direction of the transformation
    #[arg(short, long, value_enum, default_value = "write")]
    pub direction: DirectionArg,

    /// Maximum nesting depth for custom types
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Also write the transformed record to this file
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Field directory to check
    #[arg(short, long, value_name = "FILE")]
    pub fields: PathBuf,

    /// Enum directory the field directory refers to
    #[arg(short, long, value_name = "FILE")]
    pub enums: Option<PathBuf>,
}

/// Arguments shared by the registry subcommands
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Access token sent with every registry request
    #[arg(long, env = "REGISTRY_BRIDGE_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Registry base URL override
    #[arg(long, global = true)]
    pub registry_url: Option<String>,

    /// Field directory for writing (defaults to the configured one)
    #[arg(long, value_name = "FILE", global = true)]
    pub write_fields: Option<PathBuf>,

    /// Field directory for reading (defaults to the configured one)
    #[arg(long, value_name = "FILE", global = true)]
    pub read_fields: Option<PathBuf>,

    /// Enum directory (defaults to the configured one)
    #[arg(long, value_name = "FILE", global = true)]
    pub enums: Option<PathBuf>,

    #[command(subcommand)]
    pub action: RegistryAction,
}

/// Registry operations
#[derive(Subcommand, Debug)]
pub enum RegistryAction {
    /// Add a profile and print its registry id
    Create {
        /// Profile to add (JSON or YAML file, `-` for stdin)
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,
    },

    /// Read a profile back from the registry
    Read {
        /// Registry id of the entity
        #[arg(value_name = "ID")]
        id: String,

        /// User type (schema) of the entity
        #[arg(short, long)]
        user_type: String,
    },

    /// Replace an entity with a profile
    Update {
        /// Registry id of the entity
        #[arg(value_name = "ID")]
        id: String,

        /// Profile to write (JSON or YAML file, `-` for stdin)
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,
    },

    /// Delete an entity
    Delete {
        /// Registry id of the entity
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Transformation direction
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Profile to registry
    Write,
    /// Registry to profile
    Read,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Write => Direction::Write,
            DirectionArg::Read => Direction::Read,
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (0 if quiet)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["registry-bridge", "-vv", "check", "--fields", "fields.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["registry-bridge", "--quiet", "check", "--fields", "fields.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "registry-bridge",
            "transform",
            "--fields",
            "write.yaml",
            "--schema",
            "teacher",
            "--direction",
            "read",
            "-",
        ]);
        match cli.command {
            Commands::Transform(args) => {
                assert_eq!(args.input, PathBuf::from("-"));
                assert_eq!(args.schema, "teacher");
                assert_eq!(Direction::from(args.direction), Direction::Read);
                assert!(args.enums.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_registry_args() {
        let cli = Cli::parse_from([
            "registry-bridge",
            "registry",
            "--token",
            "abc",
            "read",
            "1-42",
            "--user-type",
            "teacher",
        ]);
        match cli.command {
            Commands::Registry(args) => {
                assert_eq!(args.token.as_deref(), Some("abc"));
                match args.action {
                    RegistryAction::Read { id, user_type } => {
                        assert_eq!(id, "1-42");
                        assert_eq!(user_type, "teacher");
                    }
                    other => panic!("unexpected action: {:?}", other),
                }
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
