//! # docbench-core
//!
//! Core crate for docbench. Contains the configuration schemas loaded from
//! file and environment, and the unified error system shared by the runner
//! library and the `runner` binary.
//!
//! This crate has **no** internal dependencies on other docbench crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
