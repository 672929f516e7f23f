//! Cache Module
//!
//! Keyed TTL caching: the persisted entry envelope, the typed store over a
//! storage backend, and the fetch-through accessor on top.

use std::time::Duration;

mod entry;
mod fetch;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fetch::FetchCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL applied when neither the accessor nor the call-site overrides it
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
