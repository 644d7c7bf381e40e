//! Converter process execution.
//!
//! Runs one built command as a child process with stdout/stderr captured,
//! measures wall-clock time, and classifies the outcome into a
//! [`RunResult`]. Child handles are released on every path: `kill_on_drop`
//! reaps the process if the wait is abandoned.

use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use docbench_core::config::converter::ConverterConfig;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::command::CommandLine;
use crate::models::{ConfigurationRecord, RunResult};
use crate::progress;

/// Ways a converter invocation can fail.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The process could not be spawned or waited on.
    #[error("{0}")]
    Spawn(#[from] std::io::Error),

    /// The process ran and reported failure.
    #[error("Converter exited with {}", describe_exit(.code))]
    ProcessFailed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The process exceeded the configured timeout and was killed.
    #[error("Converter timed out after {0} seconds")]
    Timeout(u64),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "signal termination".to_string(),
    }
}

/// Output of a successful invocation.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

/// Outcome and timing of one invocation.
#[derive(Debug)]
pub struct Execution {
    /// Captured output, or why the run failed.
    pub outcome: Result<CapturedOutput, ExecutorError>,
    /// Time from just before spawn to just after exit.
    pub duration: Duration,
}

/// Executor for running the external converter.
#[derive(Debug, Clone, Default)]
pub struct ConversionExecutor {
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    echo_output: bool,
}

impl ConversionExecutor {
    /// Executor that waits indefinitely and does not echo output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor configured from the converter section.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            working_dir: config.working_dir.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
            echo_output: config.echo_output,
        }
    }

    /// Kill and fail runs that exceed `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Spawn `command`, wait for it, and capture its output.
    pub async fn execute(&self, command: &CommandLine) -> Execution {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            program = %command.program,
            args = ?command.args,
            timeout_s = ?self.timeout.map(|t| t.as_secs()),
            "Spawning converter"
        );

        let start = Instant::now();

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => classify(result),
                Err(_) => Err(ExecutorError::Timeout(limit.as_secs())),
            },
            None => classify(cmd.output().await),
        };

        Execution {
            outcome,
            duration: start.elapsed(),
        }
    }

    /// Run one configuration and turn the execution into a [`RunResult`],
    /// printing diagnostics for failures.
    pub async fn run_configuration<'a>(
        &self,
        record: &'a ConfigurationRecord,
        command: &CommandLine,
    ) -> RunResult<'a> {
        let Execution { outcome, duration } = self.execute(command).await;
        let settled = self.settle(record, outcome, duration);
        if let Some(text) = settled.console {
            println!("{text}");
        }
        settled.result
    }

    /// Classify an outcome into a result and the console text it warrants.
    fn settle<'a>(
        &self,
        record: &'a ConfigurationRecord,
        outcome: Result<CapturedOutput, ExecutorError>,
        duration: Duration,
    ) -> Settled<'a> {
        match outcome {
            Ok(output) => {
                info!(
                    config = %record.name,
                    elapsed_ms = duration.as_millis() as u64,
                    "Converter completed"
                );
                let console = self.echo_output.then(|| output.stdout.clone());
                Settled {
                    result: RunResult::succeeded(record, output.stdout, duration),
                    console,
                }
            }
            Err(ExecutorError::ProcessFailed {
                code,
                stdout,
                stderr,
            }) => {
                error!(
                    config = %record.name,
                    exit_code = ?code,
                    stderr = %stderr.chars().take(500).collect::<String>(),
                    "Converter failed"
                );
                Settled {
                    console: Some(progress::render_failure(&record.name, code, &stdout, &stderr)),
                    result: RunResult::failed(record, stderr, duration),
                }
            }
            Err(ExecutorError::Timeout(secs)) => {
                let message = format!("Configuration '{}' timed out after {}s", record.name, secs);
                warn!(config = %record.name, timeout_s = secs, "Converter timed out, killed");
                Settled {
                    console: Some(progress::render_error(&message)),
                    result: RunResult::failed(record, message, duration),
                }
            }
            Err(e @ ExecutorError::Spawn(_)) => {
                let message = format!(
                    "Unexpected error running configuration '{}': {}",
                    record.name, e
                );
                error!(config = %record.name, error = %e, "Failed to run converter");
                Settled {
                    console: Some(progress::render_error(&message)),
                    result: RunResult::failed(record, message, duration),
                }
            }
        }
    }
}

/// A classified run and what to print for it.
struct Settled<'a> {
    result: RunResult<'a>,
    console: Option<String>,
}

fn classify(result: std::io::Result<Output>) -> Result<CapturedOutput, ExecutorError> {
    let output = result?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        Ok(CapturedOutput { stdout, stderr })
    } else {
        Err(ExecutorError::ProcessFailed {
            code: output.status.code(),
            stdout,
            stderr,
        })
    }
}
