//! `FinCalc` Core Error System
//!
//! Error handling for formula evaluation, configuration and the service boundary.
//! Every fallible operation returns `CoreResult<T>`; library code never panics.

use thiserror::Error;

/// Core result type for all operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Mathematically undefined or domain-nonsensical input
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument {
        /// Argument that failed the check
        field: String,
        /// Which constraint failed
        reason: String,
    },

    /// Cache backend failure surfaced from an explicit maintenance call
    #[error("Cache unavailable during {operation}: {reason}")]
    CacheUnavailable {
        /// Maintenance operation that failed
        operation: String,
        /// Reason for failure
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

impl CoreError {
    /// Create invalid argument error
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create cache unavailable error
    pub fn cache_unavailable(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if the error was caused by caller input
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidArgument { .. } => false,
            Self::CacheUnavailable { .. } => true,
            Self::Configuration { .. } => false,
        }
    }
}

/// Reject non-finite values before they reach a formula
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `value` is `NaN` or infinite.
#[inline]
pub fn ensure_finite(field: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::invalid_argument(field, "must be a finite number"))
    }
}

/// Reject a computed result that overflowed or became undefined
///
/// `field` names the input that drove the result out of range.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `value` is `NaN` or infinite.
#[inline]
pub fn ensure_finite_result(field: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::invalid_argument(
            field,
            "produces a result outside the finite number range",
        ))
    }
}

/// Require a strictly positive value
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `value` is not finite or `<= 0`.
#[inline]
pub fn ensure_positive(field: &str, value: f64) -> CoreResult<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid_argument(field, "must be greater than zero"))
    }
}

/// Require a value that is zero or greater
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `value` is not finite or negative.
#[inline]
pub fn ensure_non_negative(field: &str, value: f64) -> CoreResult<f64> {
    let value = ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid_argument(field, "must not be negative"))
    }
}

/// Require a non-zero divisor
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `value` is not finite or exactly zero.
#[inline]
pub fn ensure_non_zero(field: &str, value: f64) -> CoreResult<f64> {
    let value = ensure_finite(field, value)?;
    if value == 0.0 {
        Err(CoreError::invalid_argument(field, "must not be zero"))
    } else {
        Ok(value)
    }
}
