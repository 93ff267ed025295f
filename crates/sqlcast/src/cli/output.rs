//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde_json::Value;
use sqlcast_diagnostics::{Diagnostic, Severity};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    Json,
    JsonPretty,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a recorded diagnostic with its code
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "error:".red().bold(),
        Severity::Warning => "warning:".yellow().bold(),
        Severity::Note => "note:".cyan().bold(),
    };
    let mut line = format!("{label} [{}] {}", diagnostic.code, diagnostic.message);
    if let Some(help) = &diagnostic.help {
        line.push_str(&format!("\n  {} {help}", "help:".bold()));
    }
    line
}

/// Format a `label value` row
pub fn format_field(label: &str, value: &str) -> String {
    format!("{:>8}  {value}", label.dimmed())
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}
