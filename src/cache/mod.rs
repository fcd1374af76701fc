//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and a memory budget.

mod capacity;
mod entry;
mod size;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use capacity::{parse_capacity, GB, KB, MB};
pub use entry::CacheEntry;
pub use size::estimate_size;
pub use stats::CacheStats;
pub use store::Cache;

// == Public Constants ==
/// Budget used when a capacity string carries no recognized unit
pub const DEFAULT_MAX_MEMORY: u64 = GB;

/// TTL meaning "never expires"
pub const DEFAULT_EXPIRATION: Duration = Duration::ZERO;
