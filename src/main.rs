//! Docbench runner
//!
//! Runs the external document converter once per named configuration
//! against a single input document and writes a markdown summary report.

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use docbench_core::config::logging::LoggingConfig;

mod cli;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging, cli.verbose);

    match cli.execute(&config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::debug!(kind = %e.kind, "Runner aborted");
            output::print_fatal(&e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing on stderr. `--verbose` wins over `RUST_LOG`, which wins
/// over the configured level. Colour only when stderr is a terminal.
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
