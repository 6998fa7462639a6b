//! Input checks for tracker operations. Out-of-range values are rejected,
//! never clamped.

use videotime_core::error::AppError;
use videotime_core::result::AppResult;

/// A fraction of the video duration, 0.0 to 1.0 inclusive.
pub(crate) fn fraction(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be between 0 and 1, got {value}"
        )))
    }
}

/// A finite, non-negative number of seconds.
pub(crate) fn seconds(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be a non-negative number of seconds, got {value}"
        )))
    }
}
