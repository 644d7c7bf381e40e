//! Table and JSON output formatting for the CLI.

use serde::Serialize;
use tabled::{Table, Tabled};

use docbench_core::error::AppError;
use docbench_runner::ConfigurationRecord;
use docbench_runner::command::option_tokens;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One configuration as shown by `--list`.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ConfigurationRow {
    /// Configuration name
    #[tabled(rename = "Name")]
    pub name: String,
    /// Short description
    #[tabled(rename = "Description")]
    pub description: String,
    /// Converter flags this configuration adds
    #[tabled(rename = "Flags")]
    pub flags: String,
    /// Why the configuration is tested
    #[tabled(skip)]
    pub rationale: String,
}

impl From<&ConfigurationRecord> for ConfigurationRow {
    fn from(record: &ConfigurationRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            flags: option_tokens(&record.options).join(" "),
            rationale: record.rationale.clone(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No configurations selected.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Single stderr line for an error that aborts the run.
pub fn render_fatal(err: &AppError) -> String {
    format!("Error: {}", err.message)
}

/// Print an error that aborts the run.
pub fn print_fatal(err: &AppError) {
    eprintln!("{}", render_fatal(err));
}
