//! Cache configuration
//!
//! Runtime form of the `[cache]` settings: seconds and milliseconds become
//! `Duration`s and the entry limit is checked once here.

use fincalc_core::config::{CacheBackendKind, CacheSettings};
use std::time::Duration;

use crate::error::{CacheError, CacheResult};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Which backend to build
    pub backend: CacheBackendKind,

    /// TTL applied when a call does not choose its own
    pub default_ttl: Duration,

    /// Maximum number of entries held by the in-memory backend
    pub max_entries: usize,

    /// Redis connection URL
    pub redis_url: Option<String>,

    /// Cache operation timeout
    pub operation_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            default_ttl: Duration::from_secs(3600),
            max_entries: 1000,
            redis_url: None,
            operation_timeout: Duration::from_secs(1),
        }
    }
}

impl CacheConfig {
    /// Build from validated core settings
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Configuration` if a limit is zero or a Redis backend has
    /// no URL.
    pub fn from_settings(settings: &CacheSettings) -> CacheResult<Self> {
        let config = Self {
            backend: settings.backend,
            default_ttl: settings.default_ttl(),
            max_entries: settings.max_entries,
            redis_url: settings.redis_url.clone(),
            operation_timeout: settings.operation_timeout(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create test configuration: small in-memory cache, short timeouts
    #[must_use]
    pub fn test() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            default_ttl: Duration::from_secs(60),
            max_entries: 128,
            redis_url: None,
            operation_timeout: Duration::from_millis(100),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Configuration` describing the first invalid field.
    pub fn validate(&self) -> CacheResult<()> {
        if self.max_entries == 0 {
            return Err(CacheError::configuration("max_entries must be positive"));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::configuration("default_ttl must be positive"));
        }
        if self.operation_timeout.is_zero() {
            return Err(CacheError::configuration(
                "operation_timeout must be positive",
            ));
        }
        if self.backend == CacheBackendKind::Redis && self.redis_url.is_none() {
            return Err(CacheError::configuration(
                "redis_url is required for the redis backend",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_settings() -> CacheResult<()> {
        let config = CacheConfig::from_settings(&CacheSettings::default())?;
        assert_eq!(config, CacheConfig::default());
        Ok(())
    }

    #[test]
    fn test_redis_requires_url() {
        let config = CacheConfig {
            backend: CacheBackendKind::Redis,
            ..CacheConfig::test()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = CacheConfig {
            max_entries: 0,
            ..CacheConfig::test()
        };
        assert!(config.validate().is_err());

        let config = CacheConfig {
            default_ttl: Duration::ZERO,
            ..CacheConfig::test()
        };
        assert!(config.validate().is_err());
    }
}
