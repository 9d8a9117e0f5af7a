//! Redis Cache Implementation
//!
//! Networked backend with connection pooling. Shared by every process pointed at
//! the same database, so `clear` flushes the whole logical database.

use async_trait::async_trait;
use deadpool_redis::{Config as RedisConfig, Pool as RedisPool, Runtime};
use parking_lot::Mutex;
use redis::AsyncCommands;
use std::time::{Duration, Instant};

use super::{Cache, CacheStats, OperationCounters};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};

/// Redis cache implementation with connection pooling
pub struct RedisCache {
    pool: RedisPool,
    config: CacheConfig,
    counters: Mutex<OperationCounters>,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

/// Whole seconds for `SET EX`, rounded up so short TTLs never become zero
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 || secs == 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

impl RedisCache {
    /// Create a new Redis cache instance
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Configuration` if no Redis URL is configured,
    /// `CacheError::Unavailable` if the pool cannot hand out a connection, or
    /// `CacheError::Redis` if `PING` fails.
    pub async fn new(config: CacheConfig) -> CacheResult<Self> {
        let pool = Self::create_redis_pool(&config)?;
        Self::verify_redis_connection(&pool).await?;

        Ok(Self {
            pool,
            config,
            counters: Mutex::new(OperationCounters::default()),
        })
    }

    /// Create Redis connection pool
    fn create_redis_pool(config: &CacheConfig) -> CacheResult<RedisPool> {
        let redis_url = config
            .redis_url
            .as_ref()
            .ok_or_else(|| CacheError::configuration("Redis URL not configured"))?;

        let pool = RedisConfig::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::unavailable("connect", format!("Failed to create Redis pool: {e}")))?;

        tracing::info!("Redis connection pool created successfully");
        Ok(pool)
    }

    /// Verify Redis connection is working
    async fn verify_redis_connection(pool: &RedisPool) -> CacheResult<()> {
        let mut conn = pool.get().await.map_err(|e| {
            CacheError::unavailable("connect", format!("Failed to get Redis connection: {e}"))
        })?;

        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::redis("ping", e))?;

        tracing::info!("Redis connection verified successfully");
        Ok(())
    }

    /// Check out a pooled connection
    async fn connection(&self, operation: &str) -> CacheResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            CacheError::unavailable(operation, format!("Failed to get Redis connection: {e}"))
        })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let start = Instant::now();
        let mut conn = self.connection("get").await?;

        let result: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::redis("get", e))?;

        {
            let mut counters = self.counters.lock();
            if result.is_some() {
                counters.hits += 1;
            } else {
                counters.misses += 1;
            }
            counters.record_latency(start.elapsed());
        }

        tracing::trace!(
            "Redis GET {}: {}",
            key,
            if result.is_some() { "HIT" } else { "MISS" }
        );
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        let start = Instant::now();
        let mut conn = self.connection("set").await?;

        if let Some(ttl) = ttl {
            conn.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl))
                .await
                .map_err(|e| CacheError::redis("set", e))?;
        } else {
            conn.set::<_, _, ()>(key, value)
                .await
                .map_err(|e| CacheError::redis("set", e))?;
        }

        {
            let mut counters = self.counters.lock();
            counters.sets += 1;
            counters.record_latency(start.elapsed());
        }

        tracing::trace!("Redis SET {}: {} bytes, TTL: {:?}", key, value.len(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let start = Instant::now();
        let mut conn = self.connection("delete").await?;

        let deleted: u64 = conn
            .del(key)
            .await
            .map_err(|e| CacheError::redis("delete", e))?;

        let was_deleted = deleted > 0;
        {
            let mut counters = self.counters.lock();
            if was_deleted {
                counters.deletes += 1;
            }
            counters.record_latency(start.elapsed());
        }

        tracing::trace!(
            "Redis DEL {}: {}",
            key,
            if was_deleted { "DELETED" } else { "NOT_FOUND" }
        );
        Ok(was_deleted)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection("exists").await?;

        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| CacheError::redis("exists", e))?;

        tracing::trace!("Redis EXISTS {}: {}", key, exists);
        Ok(exists)
    }

    async fn clear(&self) -> CacheResult<()> {
        let mut conn = self.connection("clear").await?;

        redis::cmd("FLUSHDB")
            .query_async::<_, ()>(&mut *conn)
            .await
            .map_err(|e| CacheError::redis("clear", e))?;

        tracing::info!("Redis cache cleared");
        Ok(())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let mut conn = self.connection("stats").await?;
        let entries: u64 = redis::cmd("DBSIZE")
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::redis("stats", e))?;

        Ok(self.counters.lock().snapshot(entries, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_rounds_up_to_whole_seconds() {
        assert_eq!(ttl_seconds(Duration::from_millis(1)), 1);
        assert_eq!(ttl_seconds(Duration::from_secs(60)), 60);
        assert_eq!(ttl_seconds(Duration::from_millis(1_500)), 2);
        assert_eq!(ttl_seconds(Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn test_redis_cache_creation() -> CacheResult<()> {
        let config = CacheConfig {
            redis_url: Some("redis://localhost:6379".to_string()),
            ..CacheConfig::test()
        };

        // Skip when no local Redis server is running
        match RedisCache::new(config).await {
            Ok(cache) => {
                cache.set("fincalc:test", b"1", Some(Duration::from_secs(5))).await?;
                assert!(cache.exists("fincalc:test").await?);
                assert!(cache.delete("fincalc:test").await?);
                Ok(())
            }
            Err(e) if e.is_retryable() => {
                println!("Redis server not available, skipping test");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
