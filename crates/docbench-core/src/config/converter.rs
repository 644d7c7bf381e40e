//! External converter invocation settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the external document converter is launched.
///
/// The runner appends the per-configuration tokens after `program` and
/// `args`, so the default launches `python docling_test.py <input> ...`.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Executable to spawn.
    #[validate(length(min = 1))]
    pub program: String,

    /// Leading arguments placed before the generated tokens.
    pub args: Vec<String>,

    /// Working directory for the converter process (inherits ours if unset).
    pub working_dir: Option<PathBuf>,

    /// Per-run timeout. Unset means wait for the converter indefinitely.
    #[validate(range(min = 1))]
    pub timeout_seconds: Option<u64>,

    /// Print the converter's stdout after a successful run.
    pub echo_output: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
            timeout_seconds: None,
            echo_output: true,
        }
    }
}

fn default_program() -> String {
    "python".to_string()
}

fn default_args() -> Vec<String> {
    vec!["docling_test.py".to_string()]
}
