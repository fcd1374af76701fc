//! Mini Cache - load driver
//!
//! Runs a concurrent mixed workload against one shared cache and reports
//! the resulting statistics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{spawn_sweep_task, Cache, Config};

/// Keys each worker cycles through.
const KEYS_PER_WORKER: usize = 1000;

/// Main entry point for the cache load driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured budget
/// 4. Start the expiry sweep if an interval is configured
/// 5. Run the workload until done or interrupted
/// 6. Log final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_memory={}, default_ttl={}s, sweep_interval={}s, workers={}, ops_per_worker={}",
        config.max_memory,
        config.default_ttl,
        config.sweep_interval,
        config.workers,
        config.ops_per_worker
    );

    let cache: Arc<Cache<String>> = Arc::new(
        Cache::from_config(&config)
            .with_context(|| format!("invalid MAX_MEMORY {:?}", config.max_memory))?,
    );
    info!("Cache initialized with {} byte budget", cache.max_memory());

    let sweep_handle = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(cache.clone(), interval));

    let stop = Arc::new(AtomicBool::new(false));
    tokio::select! {
        result = run_workload(cache.clone(), &config, stop.clone()) => {
            let stored = result?;
            info!("Workload complete: {} writes stored", stored);
        }
        _ = shutdown_signal() => {
            stop.store(true, Ordering::Relaxed);
            warn!("Workload interrupted");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
    }

    let stats = cache.stats();
    info!(
        hit_rate = stats.hit_rate(),
        "Final stats: {}",
        serde_json::to_string(&stats)?
    );

    Ok(())
}

/// Runs every worker on the blocking pool and returns the total writes stored.
///
/// Workers touch disjoint key ranges and cycle through set, get, exists and
/// del so readers and writers contend on the same lock. Workers return early
/// once `stop` is raised.
async fn run_workload(
    cache: Arc<Cache<String>>,
    config: &Config,
    stop: Arc<AtomicBool>,
) -> anyhow::Result<u64> {
    let ttl = config.ttl();
    let ops = config.ops_per_worker;

    let handles: Vec<_> = (0..config.workers)
        .map(|worker| {
            let cache = cache.clone();
            let stop = stop.clone();
            tokio::task::spawn_blocking(move || {
                let mut stored = 0u64;
                for op in 0..ops {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    // Deletes trail the writes by half a key cycle
                    let slot = match op % 4 {
                        3 => op / 4 + KEYS_PER_WORKER / 2,
                        _ => op / 4,
                    };
                    let key = format!("worker-{}:{}", worker, slot % KEYS_PER_WORKER);
                    match op % 4 {
                        0 => {
                            if cache.set(key, format!("value-{}", op), ttl) {
                                stored += 1;
                            }
                        }
                        1 => {
                            cache.get(&key);
                        }
                        2 => {
                            cache.exists(&key);
                        }
                        _ => {
                            cache.del(&key);
                        }
                    }
                }
                stored
            })
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        total += handle.await.context("workload worker panicked")?;
    }
    Ok(total)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping workload...");
        }
        _ = terminate => {
            info!("Received SIGTERM, stopping workload...");
        }
    }
}
