//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod check;
pub mod registry;
pub mod transform;
mod utils;

pub use check::handle_check;
pub use registry::handle_registry;
pub use transform::handle_transform;
