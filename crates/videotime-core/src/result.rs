//! Convenience result type alias for Video Time.

use crate::error::AppError;

/// A specialized `Result` type for Video Time operations.
pub type AppResult<T> = Result<T, AppError>;
