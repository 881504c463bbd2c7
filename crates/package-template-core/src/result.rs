//! Convenience result type alias for the plugin.

use crate::error::AppError;

/// A specialized `Result` type for plugin operations.
pub type AppResult<T> = Result<T, AppError>;
