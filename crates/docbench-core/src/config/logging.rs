//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Logging and tracing configuration.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[validate(custom(function = "validate_format"))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

fn validate_format(format: &str) -> Result<(), ValidationError> {
    match format {
        "json" | "pretty" => Ok(()),
        _ => Err(ValidationError::new("unknown_log_format")),
    }
}
