//! Output formatting and writing utilities
//!
//! This module formats command results as JSON, YAML or human-readable text
//! and writes them to stdout (or any writer, for tests).

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::handlers::check::CheckReport;
use crate::logging::redaction;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

#[cfg(test)]
mod tests;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a directory check report
    fn format_check_report(&self, report: &CheckReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Records read best as indented JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_check_report(&self, report: &CheckReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_check_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut value_json = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut value_json);
        trace!(data = %value_json, "Outputting data");

        let formatted = self.format.format(value)?;
        self.finish(&formatted)
    }

    /// Write a directory check report
    pub fn check_report(&mut self, report: &CheckReport) -> Result<()> {
        let formatted = self.format.format_check_report(report)?;
        self.finish(&formatted)
    }

    fn finish(&mut self, formatted: &str) -> Result<()> {
        // YAML already ends with a newline
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format a check report for human reading
fn format_check_report_human(report: &CheckReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Field directory: {}\n", report.fields_origin));
    if let Some(enums) = &report.enums_origin {
        output.push_str(&format!("Enum directory: {}\n", enums));
    }
    output.push('\n');

    output.push_str("Schemas:\n");
    for schema in &report.schemas {
        output.push_str(&format!("  {} ({} mapping(s))\n", schema.schema, schema.mappings));
    }

    if !report.warnings.is_empty() {
        output.push_str(&format!("\nWarnings ({}):\n", report.warnings.len()));
        for warning in &report.warnings {
            output.push_str(&format!("  • {}\n", warning));
        }
    }

    if report.problems.is_empty() {
        output.push_str("\n✓ No problems found\n");
    } else {
        output.push_str(&format!("\n✗ Problems ({}):\n", report.problems.len()));
        for problem in &report.problems {
            output.push_str(&format!(
                "  • {}.{} [{}]: {}\n",
                problem.schema, problem.field, problem.code, problem.message
            ));
        }
    }

    output
}

/// Writer whose contents stay readable after it is handed to an [`OutputWriter`]
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An uncolored writer plus a handle on what it wrote
#[cfg(test)]
pub(crate) fn capture(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
    (writer, buffer)
}
