//! Configuration Module
//!
//! Handles cache configuration from environment variables, making backend
//! wiring explicit at process start.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory the filesystem backend stores entries under
    pub cache_dir: PathBuf,
    /// TTL applied when a call-site does not override it
    pub default_ttl: Duration,
    /// Interval between expired-entry sweep runs
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// A variable that is unset, or set to something that does not parse as
    /// a non-negative integer, falls back to its default.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Entry directory (default: `.sofra-cache`)
    /// - `DEFAULT_TTL_SECS` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            default_ttl: env::var("DEFAULT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.default_ttl),
            sweep_interval: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".sofra-cache"),
            default_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}
