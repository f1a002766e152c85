//! Registry Bridge CLI - transform user profiles and drive the registry
//!
//! This is the main entry point for the `registry-bridge` binary, providing
//! commands for transforming records, checking field and enum directories,
//! and creating, reading, updating or deleting registry users.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    // Logging defaults come from the configuration file, so load it first
    let config = Config::load_with_file(cli.config.as_deref());

    let file_logging = config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    if let Err(e) = init_logging(&cli, &file_logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            tracing::error!(exit_code = e.exit_code(), "{}", e);
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        base_url = %config.registry.base_url,
        "Executing command"
    );

    match cli.command {
        Commands::Transform(args) => handlers::handle_transform(args, &config, &mut output).await,
        Commands::Check(args) => handlers::handle_check(args, &config, &mut output).await,
        Commands::Registry(args) => handlers::handle_registry(args, &config, &mut output).await,
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, file: &config::LoggingConfig) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.apply_file(file, cli.verbosity_level());
    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
