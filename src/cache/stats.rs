//! Cache Statistics Module
//!
//! Tracks accessor activity: hits, misses, and forced refreshes. Counters
//! are atomic so every clone of an accessor shares the same tally.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Counters ==
/// Shared mutable counters behind the accessor.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
}

impl StatsCounters {
    /// Records a fetch answered from the store.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a fetch that had to invoke the producer.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a forced refresh via invalidation.
    pub fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time snapshot of the counters.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
        }
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of accessor activity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Fetches answered from the store
    pub hits: u64,
    /// Fetches that invoked the producer
    pub misses: u64,
    /// Forced refreshes via invalidation
    pub refreshes: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no fetches have been made.
    /// Refreshes are excluded; they bypass the cache check by design.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = StatsCounters::default();
        let stats = counters.snapshot();

        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.refreshes, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let counters = StatsCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_refresh();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.refreshes, 1);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats {
            hits: 1,
            misses: 1,
            refreshes: 5,
        };
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let stats = CacheStats {
            hits: 3,
            misses: 0,
            refreshes: 0,
        };
        assert_eq!(stats.hit_rate(), 1.0);
    }
}
