//! Command-line definition and dispatch.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use docbench_core::config::AppConfig;
use docbench_core::error::AppError;
use docbench_core::result::AppResult;
use docbench_runner::{BatchRunner, Registry};

use crate::output::{self, ConfigurationRow, OutputFormat};

/// Run the document converter once per named configuration and summarise
/// the results in a markdown report.
#[derive(Debug, Parser)]
#[command(name = "runner", version, about, long_about = None)]
pub struct Cli {
    /// Input document to convert
    #[arg(required_unless_present = "list")]
    pub input: Option<PathBuf>,

    /// Directory for converter output and the summary report
    #[arg(default_value = "./output")]
    pub output_dir: PathBuf,

    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only run these configurations (comma-separated names)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Kill and fail any run that takes longer than this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// List the available configurations and exit
    #[arg(long)]
    pub list: bool,

    /// Output format for --list
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Exit code for an argument error: 0 for `--help`/`--version` output,
/// 1 for anything else, including a missing input argument.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

impl Cli {
    /// Load configuration and apply command-line overrides on top of it.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(secs) = self.timeout {
            config.converter.timeout_seconds = Some(secs);
        }
        Ok(config)
    }

    /// Execute the command and return the process exit code.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<i32> {
        let registry = Registry::builtin().select(&self.only)?;

        if self.list {
            let rows: Vec<ConfigurationRow> =
                registry.iter().map(ConfigurationRow::from).collect();
            output::print_list(&rows, self.format);
            return Ok(0);
        }

        let Some(input) = self.input.as_deref() else {
            return Err(AppError::validation("An input file is required"));
        };

        debug!(
            program = %config.converter.program,
            args = ?config.converter.args,
            timeout_s = ?config.converter.timeout_seconds,
            "Converter settings"
        );

        let outcome = BatchRunner::from_config(&config.converter)
            .run(&registry, input, &self.output_dir)
            .await?;

        info!(
            succeeded = outcome.tally.succeeded(),
            failed = outcome.tally.failed(),
            "Runner finished"
        );
        Ok(outcome.exit_code())
    }
}
