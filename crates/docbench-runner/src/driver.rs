//! Batch driver: runs every selected configuration in order against one
//! input document, then writes the summary report.
//!
//! Runs are strictly sequential. A failed run is recorded and the batch
//! moves on; only setup problems and report I/O abort the batch.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use docbench_core::config::converter::ConverterConfig;
use tracing::{info, instrument, warn};

use crate::command::CommandBuilder;
use crate::error::RunnerError;
use crate::executor::ConversionExecutor;
use crate::models::RunResult;
use crate::progress;
use crate::registry::Registry;
use crate::report::ReportGenerator;
use crate::tally::RunTally;

/// Everything a finished batch produced.
#[derive(Debug)]
pub struct BatchOutcome<'a> {
    /// One result per configuration, in registry order.
    pub results: Vec<RunResult<'a>>,
    /// Final counters.
    pub tally: RunTally,
    /// Wall-clock time for the whole batch.
    pub elapsed: Duration,
    /// Where the summary report was written.
    pub report_path: PathBuf,
}

impl BatchOutcome<'_> {
    /// Whether every configuration succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.tally.all_succeeded()
    }

    /// Process exit code for this batch: 0 when all runs succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() { 0 } else { 1 }
    }
}

/// Sequential runner over a configuration registry.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    builder: CommandBuilder,
    executor: ConversionExecutor,
}

impl BatchRunner {
    /// Runner from an explicit builder and executor.
    pub fn new(builder: CommandBuilder, executor: ConversionExecutor) -> Self {
        Self { builder, executor }
    }

    /// Runner configured from the converter section.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(
            CommandBuilder::from_config(config),
            ConversionExecutor::from_config(config),
        )
    }

    /// Run every record in `registry` against `input`, writing converter
    /// output and the report into `output_dir`.
    #[instrument(skip(self, registry), fields(configs = registry.len()))]
    pub async fn run<'a>(
        &self,
        registry: &'a Registry,
        input: &Path,
        output_dir: &Path,
    ) -> Result<BatchOutcome<'a>, RunnerError> {
        if !tokio::fs::try_exists(input).await.unwrap_or(false) {
            return Err(RunnerError::InputNotFound {
                path: input.to_path_buf(),
            });
        }

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| RunnerError::OutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let total = registry.len();
        let started = Instant::now();
        let mut tally = RunTally::new(total);
        let mut results = Vec::with_capacity(total);

        println!(
            "{}",
            progress::render_banner(input, output_dir, total, Local::now().naive_local())
        );
        info!(input = %input.display(), output_dir = %output_dir.display(), total, "Batch started");

        for (i, record) in registry.iter().enumerate() {
            let command = self.builder.build(record, input, output_dir);
            println!(
                "{}",
                progress::render_run_header(i + 1, total, record, &command)
            );

            let result = self.executor.run_configuration(record, &command).await;
            tally.record(result.success, result.duration);
            progress::print_update(&record.name, result.success, result.duration, &tally);

            if !result.success {
                warn!(config = %record.name, "Configuration failed, continuing");
            }
            results.push(result);
        }

        let report_path = ReportGenerator::new(output_dir)
            .write(&results, input)
            .await?;
        let elapsed = started.elapsed();

        println!(
            "{}",
            progress::render_final_summary(
                &tally,
                elapsed,
                output_dir,
                &report_path,
                Local::now().naive_local(),
            )
        );

        let snapshot = tally.snapshot();
        info!(
            total = snapshot.total,
            succeeded = snapshot.succeeded,
            failed = snapshot.failed,
            average_secs = ?snapshot.average_secs,
            elapsed_ms = elapsed.as_millis() as u64,
            "Batch finished"
        );

        Ok(BatchOutcome {
            results,
            tally,
            elapsed,
            report_path,
        })
    }
}
