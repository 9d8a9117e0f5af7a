//! Always-miss backend used when result caching is disabled

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use super::{Cache, CacheStats, OperationCounters};
use crate::error::CacheResult;

/// Backend that stores nothing; every read misses
#[derive(Debug, Default)]
pub struct NoopCache {
    counters: Mutex<OperationCounters>,
}

impl NoopCache {
    /// Create a new no-op cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.counters.lock().misses += 1;
        tracing::trace!("Noop GET {}: MISS", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
        tracing::trace!("Noop SET {}: {} bytes discarded", key, value.len());
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn clear(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        Ok(self.counters.lock().snapshot(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_never_hits() -> CacheResult<()> {
        let cache = NoopCache::new();
        cache.set("k", b"v", None).await?;
        assert_eq!(cache.get("k").await?, None);
        assert!(!cache.delete("k").await?);

        let stats = cache.stats().await?;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 0);
        Ok(())
    }
}
