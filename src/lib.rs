//! Sofra Cache - a persistent keyed TTL cache with fetch-through access
//!
//! The local caching layer of the Sofra ordering client: a durable
//! key-value store with lazy TTL expiry, and an accessor that resolves a
//! key from cache or falls back to a caller-supplied async producer.

pub mod cache;
pub mod config;
pub mod error;
pub mod storage;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, FetchCache, DEFAULT_TTL};
pub use config::CacheConfig;
pub use error::{FetchError, StorageError, StoreError};
pub use storage::{FsBackend, MemoryBackend, StorageBackend};
pub use tasks::spawn_sweep_task;
