//! Expired-Entry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//! Entirely optional: reads already refuse expired entries, the sweep only
//! reclaims the space they occupy. Nothing starts it implicitly.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between purge runs. A failed purge is logged and retried on the next
/// interval; the task never gives up on its own.
///
/// # Arguments
/// * `store` - The cache store to sweep
/// * `interval` - Time between sweep runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(store.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task(store: CacheStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("starting expired-entry sweep with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            match store.purge_expired().await {
                Ok(0) => debug!("sweep: no expired entries found"),
                Ok(removed) => info!("sweep: removed {} expired entries", removed),
                Err(e) => warn!(error = %e, "sweep failed, retrying next interval"),
            }
        }
    })
}
