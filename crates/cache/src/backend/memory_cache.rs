//! Memory Cache Implementation
//!
//! In-process LRU cache for calculator results. Entries carry an absolute expiry;
//! expired entries are dropped lazily on read and by an occasional sweep.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use super::{Cache, CacheStats, OperationCounters};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};

/// Share of reads that also sweep expired entries
const SWEEP_PROBABILITY: f32 = 0.01;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Create a new cache entry
    fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        Self { data, expires_at }
    }

    /// Check if entry has expired
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// In-memory LRU cache implementation
#[derive(Debug)]
pub struct MemoryCache {
    cache: Mutex<LruCache<String, CacheEntry>>,
    counters: Mutex<OperationCounters>,
}

impl MemoryCache {
    /// Create a new memory cache holding at most `config.max_entries` entries
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Configuration` if `max_entries` is zero.
    pub fn new(config: &CacheConfig) -> CacheResult<Self> {
        Self::with_capacity(config.max_entries)
    }

    /// Create a new memory cache with an explicit capacity
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Configuration` if `max_entries` is zero.
    pub fn with_capacity(max_entries: usize) -> CacheResult<Self> {
        let capacity = NonZeroUsize::new(max_entries)
            .ok_or_else(|| CacheError::configuration("Invalid cache size: 0 entries"))?;

        tracing::info!("Memory cache created with capacity: {} entries", max_entries);

        Ok(Self {
            cache: Mutex::new(LruCache::new(capacity)),
            counters: Mutex::new(OperationCounters::default()),
        })
    }

    /// Number of live and not-yet-swept entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut cache = self.cache.lock();

        let expired_keys: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            cache.pop(key);
        }

        if !expired_keys.is_empty() {
            tracing::trace!("Memory cache swept {} expired entries", expired_keys.len());
        }
        expired_keys.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let start = Instant::now();

        if fastrand::f32() < SWEEP_PROBABILITY {
            self.purge_expired();
        }

        let result = {
            let mut cache = self.cache.lock();
            let lookup = cache
                .get(key)
                .map(|entry| (entry.is_expired(start), entry.data.clone()));
            match lookup {
                Some((false, data)) => Some(data),
                Some((true, _)) => {
                    cache.pop(key);
                    None
                }
                None => None,
            }
        };

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
            "Memory GET {}: {}",
            key,
            if result.is_some() { "HIT" } else { "MISS" }
        );
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        let start = Instant::now();
        let entry = CacheEntry::new(value.to_vec(), ttl);

        let evicted = {
            let mut cache = self.cache.lock();
            // push reports the displaced entry; same-key replacement is not an eviction
            cache
                .push(key.to_string(), entry)
                .is_some_and(|(displaced, _)| displaced != key)
        };

        {
            let mut counters = self.counters.lock();
            counters.sets += 1;
            if evicted {
                counters.evictions += 1;
            }
            counters.record_latency(start.elapsed());
        }

        tracing::trace!(
            "Memory SET {}: {} bytes, TTL: {:?}",
            key,
            value.len(),
            ttl
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let start = Instant::now();
        let was_present = self.cache.lock().pop(key).is_some();

        {
            let mut counters = self.counters.lock();
            if was_present {
                counters.deletes += 1;
            }
            counters.record_latency(start.elapsed());
        }

        tracing::trace!(
            "Memory DEL {}: {}",
            key,
            if was_present { "DELETED" } else { "NOT_FOUND" }
        );
        Ok(was_present)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let now = Instant::now();
        let exists = self
            .cache
            .lock()
            .peek(key)
            .is_some_and(|entry| !entry.is_expired(now));

        tracing::trace!("Memory EXISTS {}: {}", key, exists);
        Ok(exists)
    }

    async fn clear(&self) -> CacheResult<()> {
        self.cache.lock().clear();
        tracing::info!("Memory cache cleared");
        Ok(())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let (entries, memory_usage) = {
            let cache = self.cache.lock();
            let bytes: usize = cache.iter().map(|(_, entry)| entry.data.len()).sum();
            (cache.len(), bytes)
        };

        let entries = u64::try_from(entries).unwrap_or(u64::MAX);
        let memory_usage = u64::try_from(memory_usage).unwrap_or(u64::MAX);
        Ok(self.counters.lock().snapshot(entries, memory_usage))
    }
}
