//! Convenience result type alias for docbench.

use crate::error::AppError;

/// A specialized `Result` type for docbench operations.
pub type AppResult<T> = Result<T, AppError>;
