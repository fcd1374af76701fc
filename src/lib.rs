//! Mini Cache - A memory-bounded in-process cache
//!
//! Provides a thread-safe key-value store with per-entry TTL expiration and
//! an approximate memory budget. Writes that would exceed the budget are
//! declined; nothing is ever evicted to make room.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, DEFAULT_EXPIRATION};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
