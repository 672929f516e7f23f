//! Cache Store Module
//!
//! Typed get/set/remove over an injected storage backend, with lazy TTL
//! expiry. Values are serialized to JSON at the storage boundary; expiry is
//! evaluated only at read time, by comparing the stored instant to now.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::CacheEntry;
use crate::error::StoreError;
use crate::storage::StorageBackend;

// == Cache Store ==
/// Durable key→entry storage over a pluggable backend.
///
/// Cloning is cheap; clones share the same backend. The store never masks a
/// backend failure as a miss: absence and staleness return `Ok(None)`, every
/// other problem is an error.
#[derive(Clone)]
pub struct CacheStore {
    /// Durable key-value backend
    backend: Arc<dyn StorageBackend>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    // == Get ==
    /// Retrieves the value for `key`, if present and unexpired.
    ///
    /// Returns `Ok(None)` both when no entry exists and when the stored
    /// entry has expired; callers cannot tell the two apart. An expired
    /// entry is left in place, it is simply never returned.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let Some(bytes) = self.backend.read(key).await? else {
            return Ok(None);
        };

        let entry: CacheEntry =
            serde_json::from_slice(&bytes).map_err(StoreError::Deserialize)?;

        if entry.is_expired() {
            debug!(key, "entry expired, treating as absent");
            return Ok(None);
        }

        let value = serde_json::from_value(entry.value).map_err(StoreError::Deserialize)?;
        Ok(Some(value))
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any existing entry unconditionally. A zero TTL writes an
    /// entry that every subsequent read treats as absent.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(value).map_err(StoreError::Serialize)?;
        let entry = CacheEntry::new(value, ttl);
        let bytes = serde_json::to_vec(&entry).map_err(StoreError::Serialize)?;

        self.backend.write(key, bytes).await?;
        Ok(())
    }

    // == Remove ==
    /// Deletes any entry for `key`. No-op, not an error, when absent.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key).await?;
        Ok(())
    }

    // == Purge Expired ==
    /// Removes every entry whose expiry instant has passed.
    ///
    /// Optional maintenance: `get` already refuses expired entries, this
    /// only reclaims the space they occupy. Entries that fail to decode are
    /// left in place; purge removes only what it can prove expired.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> Result<usize, StoreError> {
        let keys = self.backend.list().await?;
        let mut removed = 0;

        for key in keys {
            let Some(bytes) = self.backend.read(&key).await? else {
                continue;
            };

            let entry: CacheEntry = match serde_json::from_slice(&bytes) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(key, error = %e, "skipping undecodable entry during purge");
                    continue;
                }
            };

            if entry.is_expired() {
                self.backend.delete(&key).await?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore").finish_non_exhaustive()
    }
}
