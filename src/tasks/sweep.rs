//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! that are never read again stop counting against the memory budget.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Cache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between runs.
/// Each run holds the cache's exclusive lock only while purging.
///
/// # Returns
/// A JoinHandle for the spawned task. Abort it to stop the sweep.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Cache::<String>::new("10MB")?);
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: Arc<Cache<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_EXPIRATION;

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let cache = Arc::new(Cache::new("1KB").unwrap());
        cache.set("expire_soon", "value".to_string(), Duration::from_millis(50));

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;

        // Reaped without any read touching the key
        assert!(!cache.exists("expire_soon"));
        assert_eq!(cache.used_memory(), 0);
        assert_eq!(cache.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let cache = Arc::new(Cache::new("1KB").unwrap());
        cache.set("long_lived", "value".to_string(), Duration::from_secs(3600));
        cache.set("permanent", "value".to_string(), DEFAULT_EXPIRATION);

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("long_lived"), Some("value".to_string()));
        assert_eq!(cache.get("permanent"), Some("value".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache: Arc<Cache<String>> = Arc::new(Cache::default());

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
