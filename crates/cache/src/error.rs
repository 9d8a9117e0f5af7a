//! `FinCalc` Cache Error System
//!
//! Errors raised by cache backends and the facade. Inside `get_or_compute` every
//! backend error is recovered; maintenance calls surface them to the caller.

use fincalc_core::CoreError;
use std::time::Duration;
use thiserror::Error;

/// Cache result type for all backend operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend could not serve the request
    #[error("Cache unavailable: {operation} - {reason}")]
    Unavailable {
        /// Operation that failed
        operation: String,
        /// Reason for failure
        reason: String,
    },

    /// Backend did not answer within the operation timeout
    #[error("Cache operation timed out after {duration:?}: {operation}")]
    Timeout {
        /// Operation that timed out
        operation: String,
        /// Duration before timeout
        duration: Duration,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// A result could not be encoded for storage, or a stored payload decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Redis rejected a command
    #[cfg(feature = "redis")]
    #[error("Redis error during {operation}: {source}")]
    Redis {
        /// Command that failed
        operation: String,
        /// Error reported by the client
        #[source]
        source: redis::RedisError,
    },
}

impl CacheError {
    /// Create unavailable error
    pub fn unavailable(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a Redis client error for `operation`
    #[cfg(feature = "redis")]
    pub fn redis(operation: impl Into<String>, source: redis::RedisError) -> Self {
        Self::Redis {
            operation: operation.into(),
            source,
        }
    }

    /// Check if error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable { .. } => true,
            Self::Timeout { .. } => true,
            Self::Configuration { .. } => false,
            Self::Serialization(_) => false,
            #[cfg(feature = "redis")]
            Self::Redis { .. } => true,
        }
    }

    /// Name of the operation that failed, where the error carries one
    #[must_use]
    pub fn operation(&self) -> &str {
        match self {
            Self::Unavailable { operation, .. } | Self::Timeout { operation, .. } => operation,
            #[cfg(feature = "redis")]
            Self::Redis { operation, .. } => operation,
            Self::Configuration { .. } => "configure",
            Self::Serialization(_) => "serialize",
        }
    }
}

impl From<CacheError> for CoreError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Configuration { message } => Self::configuration(message),
            other => {
                let operation = other.operation().to_string();
                Self::cache_unavailable(operation, other.to_string())
            }
        }
    }
}
