//! Cache backends
//!
//! Key-value stores the facade runs against: an in-process LRU, Redis behind the
//! `redis` feature, and an always-miss backend for when caching is disabled.

/// Ratio helpers for statistics
mod safe_cast {
    /// Safely convert u64 to f64 with precision warning for large values
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn u64_to_f64_safe(value: u64) -> f64 {
        // f64 mantissa is 52 bits, so values > 2^52 lose precision
        const MAX_SAFE_U64_FOR_F64: u64 = (1_u64 << 52) - 1;

        if value > MAX_SAFE_U64_FOR_F64 {
            tracing::warn!("Precision loss detected in u64->f64 conversion: {}", value);
        }

        value as f64
    }

    /// Calculate ratio, zero when the denominator is zero
    #[must_use]
    pub fn safe_ratio(numerator: u64, denominator: u64) -> f64 {
        if denominator == 0 {
            0.0_f64
        } else {
            u64_to_f64_safe(numerator) / u64_to_f64_safe(denominator)
        }
    }
}

pub mod memory_cache;
pub mod noop_cache;
#[cfg(feature = "redis")]
pub mod redis_cache;

pub use memory_cache::MemoryCache;
pub use noop_cache::NoopCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
pub use safe_cast::safe_ratio;

use fincalc_core::config::CacheBackendKind;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::error::CacheResult;

/// Key-value store holding serialized results
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Cache: Send + Sync {
    /// Get value from cache; expired entries read as `None`
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Set value in cache, replacing any previous value
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()>;

    /// Delete value from cache, reporting whether it was present
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Check if key exists in cache
    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// Clear all cache entries
    async fn clear(&self) -> CacheResult<()>;

    /// Get cache statistics
    async fn stats(&self) -> CacheResult<CacheStats>;
}

/// Backend statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,

    /// Number of cache misses
    pub misses: u64,

    /// Number of cache sets
    pub sets: u64,

    /// Number of deletes that removed an entry
    pub deletes: u64,

    /// Number of entries evicted to make room
    pub evictions: u64,

    /// Number of entries in cache
    pub entries: u64,

    /// Payload bytes held
    pub memory_usage: u64,

    /// Hit ratio (hits / (hits + misses))
    pub hit_ratio: f64,

    /// Average latency in microseconds
    pub avg_latency_us: u64,
}

impl CacheStats {
    /// Calculate hit ratio
    pub fn calculate_hit_ratio(&mut self) {
        let total = self.hits + self.misses;
        self.hit_ratio = safe_ratio(self.hits, total);
    }
}

/// Internal counters shared by the backends
#[derive(Debug, Clone, Default)]
pub(crate) struct OperationCounters {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) sets: u64,
    pub(crate) deletes: u64,
    pub(crate) evictions: u64,
    pub(crate) avg_latency_us: u64,
}

impl OperationCounters {
    /// Fold one operation's latency into the running average
    pub(crate) fn record_latency(&mut self, duration: Duration) {
        let duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.avg_latency_us = self.avg_latency_us / 2 + duration_us / 2;
    }

    /// Snapshot into public statistics
    pub(crate) fn snapshot(&self, entries: u64, memory_usage: u64) -> CacheStats {
        let mut stats = CacheStats {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            deletes: self.deletes,
            evictions: self.evictions,
            entries,
            memory_usage,
            hit_ratio: 0.0,
            avg_latency_us: self.avg_latency_us,
        };
        stats.calculate_hit_ratio();
        stats
    }
}

/// Build the backend selected by `config`
///
/// # Errors
///
/// Returns `CacheError::Configuration` if the configuration is invalid or selects
/// Redis without the `redis` feature, or the Redis backend's connection error.
pub async fn build_backend(config: &CacheConfig) -> CacheResult<Arc<dyn Cache>> {
    config.validate()?;

    match config.backend {
        CacheBackendKind::Memory => Ok(Arc::new(MemoryCache::new(config)?)),
        CacheBackendKind::Disabled => {
            tracing::info!("Result caching disabled; every call computes");
            Ok(Arc::new(NoopCache::new()))
        }
        #[cfg(feature = "redis")]
        CacheBackendKind::Redis => Ok(Arc::new(RedisCache::new(config.clone()).await?)),
        #[cfg(not(feature = "redis"))]
        CacheBackendKind::Redis => Err(crate::error::CacheError::configuration(
            "the redis backend requires the `redis` feature",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_ratio() {
        let mut stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        stats.calculate_hit_ratio();
        assert!((stats.hit_ratio - 0.75).abs() < f64::EPSILON);

        let mut empty = CacheStats::default();
        empty.calculate_hit_ratio();
        assert!(empty.hit_ratio.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_build_backend_by_kind() -> CacheResult<()> {
        let memory = build_backend(&CacheConfig::test()).await?;
        memory.set("k", b"v", None).await?;
        assert!(memory.exists("k").await?);

        let disabled = build_backend(&CacheConfig {
            backend: CacheBackendKind::Disabled,
            ..CacheConfig::test()
        })
        .await?;
        disabled.set("k", b"v", None).await?;
        assert!(!disabled.exists("k").await?);
        Ok(())
    }

    #[cfg(not(feature = "redis"))]
    #[tokio::test]
    async fn test_redis_without_feature_is_configuration_error() {
        let result = build_backend(&CacheConfig {
            backend: CacheBackendKind::Redis,
            redis_url: Some("redis://localhost:6379".to_string()),
            ..CacheConfig::test()
        })
        .await;
        assert!(matches!(
            result,
            Err(crate::error::CacheError::Configuration { .. })
        ));
    }
}
