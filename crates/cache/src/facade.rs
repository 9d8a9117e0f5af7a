//! Cache Facade
//!
//! The single compute-or-fetch path every calculator goes through. Results are
//! stored as JSON bytes under their [`Fingerprint`]. Backend failures inside
//! [`CacheFacade::get_or_compute`] are logged and bypassed; only the explicit
//! maintenance calls report them.

use fincalc_core::CoreResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::fingerprint::Fingerprint;

/// JSON form of values that cannot be read back as the type they came from,
/// such as non-finite floats
const NULL_PAYLOAD: &[u8] = b"null";

/// Counters kept by the facade itself
#[derive(Debug, Default)]
struct FacadeCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    fallbacks: AtomicU64,
    decode_failures: AtomicU64,
}

/// Snapshot of facade and backend statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacadeStats {
    /// Calls answered from the cache
    pub hits: u64,
    /// Calls that found nothing usable
    pub misses: u64,
    /// Times a compute callback ran
    pub computations: u64,
    /// Backend failures bypassed by computing directly
    pub fallbacks: u64,
    /// Cached payloads that failed to decode
    pub decode_failures: u64,
    /// Backend statistics, when the backend could report them
    pub backend: Option<CacheStats>,
}

/// Fingerprinted, TTL-bounded, fail-open result cache
pub struct CacheFacade {
    backend: Arc<dyn Cache>,
    default_ttl: Duration,
    operation_timeout: Duration,
    counters: FacadeCounters,
}

impl std::fmt::Debug for CacheFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFacade")
            .field("default_ttl", &self.default_ttl)
            .field("operation_timeout", &self.operation_timeout)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl CacheFacade {
    /// Create a facade over `backend` with the TTL and timeout from `config`
    #[must_use]
    pub fn new(backend: Arc<dyn Cache>, config: &CacheConfig) -> Self {
        tracing::info!(
            "Cache facade ready: default TTL {:?}, operation timeout {:?}",
            config.default_ttl,
            config.operation_timeout
        );
        Self {
            backend,
            default_ttl: config.default_ttl,
            operation_timeout: config.operation_timeout,
            counters: FacadeCounters::default(),
        }
    }

    /// Create a facade with an explicit default TTL and the default timeout
    #[must_use]
    pub fn with_ttl(backend: Arc<dyn Cache>, default_ttl: Duration) -> Self {
        let config = CacheConfig {
            default_ttl,
            ..CacheConfig::default()
        };
        Self::new(backend, &config)
    }

    /// TTL applied when a call passes `None`
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Return the cached result for `fingerprint`, or compute and store it
    ///
    /// `compute` runs at most once. Its error is returned unchanged and nothing
    /// is stored. Backend errors and timeouts never reach the caller: a failed
    /// read computes directly and skips the write, a failed write still returns
    /// the computed value.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` returns on failure.
    pub async fn get_or_compute<T, F>(
        &self,
        fingerprint: &Fingerprint,
        ttl: Option<Duration>,
        compute: F,
    ) -> CoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> CoreResult<T>,
    {
        self.get_or_compute_with(fingerprint, ttl, || std::future::ready(compute()))
            .await
    }

    /// Async form of [`get_or_compute`](Self::get_or_compute)
    ///
    /// Used by composite operations whose computation itself goes through the
    /// cache, so the inner lookup can be awaited.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` resolves to on failure.
    pub async fn get_or_compute_with<T, F, Fut>(
        &self,
        fingerprint: &Fingerprint,
        ttl: Option<Duration>,
        compute: F,
    ) -> CoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        let key = fingerprint.as_str();

        match self.read(key).await {
            Ok(Some(bytes)) => match decode::<T>(&bytes) {
                Ok(value) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    record_hit();
                    tracing::debug!("Cache hit: {}", key);
                    return Ok(value);
                }
                Err(e) => {
                    self.counters.decode_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                }
            },
            Ok(None) => {
                tracing::debug!("Cache miss: {}", key);
            }
            Err(e) => {
                self.record_fallback("get", key, &e);
                return self.compute(key, compute).await;
            }
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        record_miss();

        let value = self.compute(key, compute).await?;

        match encode(&value) {
            Ok(Some(bytes)) => {
                let ttl = ttl.unwrap_or(self.default_ttl);
                if let Err(e) = self.write(key, &bytes, ttl).await {
                    self.record_fallback("set", key, &e);
                }
            }
            Ok(None) => {
                tracing::debug!("Result for {} encodes as null, not cached", key);
            }
            Err(e) => {
                tracing::warn!("Result for {} not cached: {}", key, e);
            }
        }

        Ok(value)
    }

    /// Remove one cached result, reporting whether it was present
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or `CacheError::Timeout` if it does not
    /// answer in time.
    pub async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        let removed = self
            .bounded("delete", self.backend.delete(key))
            .await
            .inspect_err(|e| tracing::error!("Failed to invalidate {}: {}", key, e))?;

        tracing::debug!("Invalidated {}: {}", key, removed);
        Ok(removed)
    }

    /// Remove every cached result
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or `CacheError::Timeout` if it does not
    /// answer in time.
    pub async fn clear_all(&self) -> CacheResult<()> {
        self.bounded("clear", self.backend.clear())
            .await
            .inspect_err(|e| tracing::error!("Failed to clear cache: {}", e))?;

        tracing::info!("Cache cleared");
        Ok(())
    }

    /// Facade counters plus backend statistics
    pub async fn stats(&self) -> FacadeStats {
        let backend = match self.bounded("stats", self.backend.stats()).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!("Backend statistics unavailable: {}", e);
                None
            }
        };

        FacadeStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            fallbacks: self.counters.fallbacks.load(Ordering::Relaxed),
            decode_failures: self.counters.decode_failures.load(Ordering::Relaxed),
            backend,
        }
    }

    async fn compute<T, F, Fut>(&self, key: &str, compute: F) -> CoreResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        self.counters.computations.fetch_add(1, Ordering::Relaxed);
        let result = compute().await;
        if let Err(e) = &result {
            tracing::debug!("Computation for {} failed, nothing cached: {}", key, e);
        }
        result
    }

    async fn read(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.bounded("get", self.backend.get(key)).await
    }

    async fn write(&self, key: &str, bytes: &[u8], ttl: Duration) -> CacheResult<()> {
        self.bounded("set", self.backend.set(key, bytes, Some(ttl)))
            .await
    }

    /// Run a backend call under the operation timeout
    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = CacheResult<T>>,
    ) -> CacheResult<T> {
        tokio::time::timeout(self.operation_timeout, call)
            .await
            .unwrap_or_else(|_| Err(CacheError::timeout(operation, self.operation_timeout)))
    }

    fn record_fallback(&self, operation: &str, key: &str, error: &CacheError) {
        self.counters.fallbacks.fetch_add(1, Ordering::Relaxed);
        #[cfg(feature = "metrics")]
        metrics::counter!("fincalc_cache_fallbacks_total", "operation" => operation.to_string())
            .increment(1);
        tracing::warn!(
            "Cache {} failed for {}, computing directly: {}",
            operation,
            key,
            error
        );
    }
}

/// Storable payload for `value`, `None` when it would only read back as `null`
fn encode<T: Serialize>(value: &T) -> CacheResult<Option<Vec<u8>>> {
    let bytes = serde_json::to_vec(value)?;
    Ok((bytes != NULL_PAYLOAD).then_some(bytes))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CacheResult<T> {
    serde_json::from_slice(bytes).map_err(CacheError::from)
}

#[cfg(feature = "metrics")]
fn record_hit() {
    metrics::counter!("fincalc_cache_hits_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_hit() {}

#[cfg(feature = "metrics")]
fn record_miss() {
    metrics::counter!("fincalc_cache_misses_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_miss() {}
