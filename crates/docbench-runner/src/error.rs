//! Error type for batch-level failures.
//!
//! Per-configuration failures never surface here: they are recorded as failed
//! [`RunResult`](crate::models::RunResult)s and the batch continues. Only
//! startup problems and report I/O abort a batch.

use docbench_core::error::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a batch or reject its setup.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The input document does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// Two configuration records share a name.
    #[error("Duplicate configuration name: {name}")]
    DuplicateConfiguration {
        /// The repeated name.
        name: String,
    },

    /// A requested configuration is not in the registry.
    #[error("Unknown configuration '{name}' (available: {available})")]
    UnknownConfiguration {
        /// The requested name.
        name: String,
        /// Comma-separated registry names.
        available: String,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The summary report could not be written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        /// Report file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<RunnerError> for AppError {
    fn from(err: RunnerError) -> Self {
        match &err {
            RunnerError::InputNotFound { .. } => AppError::not_found(err.to_string()),
            RunnerError::DuplicateConfiguration { .. }
            | RunnerError::UnknownConfiguration { .. } => AppError::validation(err.to_string()),
            RunnerError::OutputDir { .. } | RunnerError::ReportWrite { .. } => {
                AppError::io(err.to_string())
            }
        }
    }
}
