//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file layered under `DOCBENCH__*` environment variables. Every
//! field carries a serde default, so an absent file yields a usable config.

pub mod converter;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use self::converter::ConverterConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Default configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DOCBENCH";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External converter invocation settings.
    pub converter: ConverterConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// When `path` is given the file must exist. Otherwise
    /// `config/default.{toml,...}` is read if present. Environment variables
    /// prefixed with `DOCBENCH__` override file values, e.g.
    /// `DOCBENCH__CONVERTER__PROGRAM=python3`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file_source = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.validate()?;
        debug!(
            file = ?path,
            program = %app.converter.program,
            timeout_s = ?app.converter.timeout_seconds,
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), AppError> {
        self.converter.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
