//! Fetch-Through Accessor Module
//!
//! Resolves a value for a key by preferring the cache and falling back to a
//! caller-supplied async producer: check cache, on a hit return it, on a
//! miss produce, store with a TTL, and return the fresh value.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheStats, CacheStore, DEFAULT_TTL};
use crate::config::CacheConfig;
use crate::error::{FetchError, StoreError};
use crate::storage::FsBackend;

// == Fetch Cache ==
/// Cache-first access over a [`CacheStore`].
///
/// The accessor never learns *why* a value is missing; the store collapses
/// "never written" and "expired" into the same absence. Concurrent fetches
/// of the same missing key may each invoke their producer and each write;
/// the last write wins. No deduplication or ordering is promised.
#[derive(Debug, Clone)]
pub struct FetchCache {
    store: CacheStore,
    /// TTL applied when a call-site does not override it
    default_ttl: Duration,
    /// Hit/miss/refresh tally, shared across clones
    stats: Arc<StatsCounters>,
}

impl FetchCache {
    // == Constructors ==
    /// Creates an accessor over `store` with the standard default TTL.
    pub fn new(store: CacheStore) -> Self {
        Self::with_default_ttl(store, DEFAULT_TTL)
    }

    /// Creates an accessor with a custom default TTL.
    pub fn with_default_ttl(store: CacheStore, default_ttl: Duration) -> Self {
        Self {
            store,
            default_ttl,
            stats: Arc::new(StatsCounters::default()),
        }
    }

    /// Wires up the full stack from configuration: filesystem backend under
    /// `config.cache_dir`, a store over it, and this accessor on top.
    pub async fn from_config(config: &CacheConfig) -> Result<Self, StoreError> {
        let backend = FsBackend::open(&config.cache_dir).await?;
        let store = CacheStore::new(Arc::new(backend));
        Ok(Self::with_default_ttl(store, config.default_ttl))
    }

    // == Fetch ==
    /// Resolves `key`, preferring the cache, using the default TTL when the
    /// producer has to be invoked.
    pub async fn fetch<T, E, F, Fut>(&self, key: &str, producer: F) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.fetch_with_ttl(key, self.default_ttl, producer).await
    }

    /// Resolves `key` with a per-call-site TTL.
    ///
    /// On a miss the producer runs once; its result is stored with `ttl`
    /// and returned. On producer failure nothing is written and the error
    /// comes back unchanged. No retries.
    pub async fn fetch_with_ttl<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.store.get(key).await? {
            debug!(key, "cache hit");
            self.stats.record_hit();
            return Ok(value);
        }

        debug!(key, "cache miss, invoking producer");
        self.stats.record_miss();

        let fresh = producer().await.map_err(FetchError::Producer)?;
        self.store.set(key, &fresh, ttl).await?;
        Ok(fresh)
    }

    // == Invalidate ==
    /// Removes any entry for `key`, then forces one fresh fetch with the
    /// default TTL.
    pub async fn invalidate<T, E, F, Fut>(&self, key: &str, producer: F) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.invalidate_with_ttl(key, self.default_ttl, producer).await
    }

    /// Removes any entry for `key`, then forces one fresh fetch with a
    /// per-call-site TTL.
    ///
    /// After this returns successfully, the store holds a value no older
    /// than the invalidation call, and that value is returned.
    pub async fn invalidate_with_ttl<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.store.remove(key).await?;

        debug!(key, "invalidated, forcing refresh");
        self.stats.record_refresh();

        let fresh = producer().await.map_err(FetchError::Producer)?;
        self.store.set(key, &fresh, ttl).await?;
        Ok(fresh)
    }

    // == Accessors ==
    /// The underlying store, for maintenance such as the expiry sweep.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Snapshot of hit/miss/refresh counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, StorageBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn memory_accessor() -> FetchCache {
        FetchCache::new(CacheStore::new(Arc::new(MemoryBackend::new())))
    }

    #[tokio::test]
    async fn test_fetch_miss_invokes_producer_and_caches() {
        let cache = memory_accessor();
        let calls = AtomicUsize::new(0);

        let producer = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("A".to_string())
        };

        let value = cache.fetch("x", producer).await.unwrap();
        assert_eq!(value, "A");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_hit_skips_producer() {
        let cache = memory_accessor();
        let calls = AtomicUsize::new(0);

        // Producer yields "A" on the first call, "B" afterwards
        let producer = || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(if n == 0 { "A".to_string() } else { "B".to_string() })
        };

        let first = cache.fetch("x", producer).await.unwrap();
        let second = cache.fetch("x", producer).await.unwrap();

        assert_eq!(first, "A");
        assert_eq!(second, "A");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_fresh_value() {
        let cache = memory_accessor();
        let calls = AtomicUsize::new(0);

        let producer = || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(if n == 0 { "A".to_string() } else { "B".to_string() })
        };

        let first = cache.fetch("x", producer).await.unwrap();
        assert_eq!(first, "A");

        let refreshed = cache.invalidate("x", producer).await.unwrap();
        assert_eq!(refreshed, "B");

        // The fresh value is what a plain fetch now sees
        let after = cache.fetch("x", producer).await.unwrap();
        assert_eq!(after, "B");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_producer_failure_leaves_store_untouched() {
        let backend = Arc::new(MemoryBackend::new());
        let cache = FetchCache::new(CacheStore::new(backend.clone()));

        let result: Result<String, _> = cache
            .fetch("x", || async { Err("connection refused".to_string()) })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_producer());
        assert_eq!(err.into_producer(), Some("connection refused".to_string()));

        // Nothing was written for that key
        assert!(backend.read("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_fetches_fresh() {
        let cache = memory_accessor();
        let calls = AtomicUsize::new(0);

        let producer = || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(format!("v{n}"))
        };

        // Zero TTL: the stored value is stale for the next read
        let first = cache.fetch_with_ttl("x", Duration::ZERO, producer).await.unwrap();
        let second = cache.fetch("x", producer).await.unwrap();

        assert_eq!(first, "v0");
        assert_eq!(second, "v1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stats_reflect_activity() {
        let cache = memory_accessor();

        let producer = || async { Ok::<_, String>(1u32) };

        cache.fetch("k", producer).await.unwrap(); // miss
        cache.fetch("k", producer).await.unwrap(); // hit
        cache.invalidate("k", producer).await.unwrap(); // refresh

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[tokio::test]
    async fn test_clones_share_store_and_stats() {
        let cache = memory_accessor();
        let clone = cache.clone();

        let producer = || async { Ok::<_, String>("shared".to_string()) };

        cache.fetch("k", producer).await.unwrap();
        let value = clone.fetch("k", producer).await.unwrap();

        assert_eq!(value, "shared");
        assert_eq!(clone.stats().hits, 1);
        assert_eq!(clone.stats().misses, 1);
    }
}
