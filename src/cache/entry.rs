//! Cache Entry Module
//!
//! Defines the persisted envelope for a single cached value.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A single cached value with its creation and expiration instants.
///
/// The payload is kept as JSON inside the envelope; typed access happens at
/// the store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// Instant after which the entry is stale
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A zero TTL yields an entry that is already stale for every subsequent
    /// read. A TTL too large to represent clamps to the far future rather
    /// than panicking.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            value,
            created_at: now,
            expires_at: expires_after(now, ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale.
    ///
    /// An entry is valid if and only if the current time is strictly before
    /// `expires_at`, so an entry written with a zero TTL is expired on every
    /// read after the write.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or zero once the entry has expired.
    pub fn ttl_remaining(&self) -> Duration {
        let remaining = self.expires_at - Utc::now();
        remaining.to_std().unwrap_or(Duration::ZERO)
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, clamping to the far future on overflow.
fn expires_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
