//! Cache Statistics Module
//!
//! Tracks cache counters: hits, misses, expirations and rejected writes.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Stats Counters ==
/// Live counters shared by all cache operations.
///
/// Atomics let `get` record hits and misses while holding only a shared lock.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    rejections: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Builds a snapshot, combining counters with table-level figures.
    pub(crate) fn snapshot(
        &self,
        total_entries: usize,
        used_memory: u64,
        max_memory: u64,
    ) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            total_entries,
            used_memory,
            max_memory,
            taken_at: Utc::now(),
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of cache performance and occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries reaped after expiring
    pub expirations: u64,
    /// Number of writes declined (unserializable or over budget)
    pub rejections: u64,
    /// Number of entries in the table, expired-but-unreaped included
    pub total_entries: usize,
    /// Estimated bytes billed against the budget
    pub used_memory: u64,
    /// Memory budget in bytes
    pub max_memory: u64,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Bytes still available under the budget.
    pub fn available_memory(&self) -> u64 {
        self.max_memory.saturating_sub(self.used_memory)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_new() {
        let stats = StatsCounters::default().snapshot(0, 0, 1024);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.rejections, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.available_memory(), 1024);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = StatsCounters::default().snapshot(0, 0, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let counters = StatsCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(counters.snapshot(0, 0, 0).hit_rate(), 0.75);
    }

    #[test]
    fn test_record_expirations_and_rejections() {
        let counters = StatsCounters::default();
        counters.record_expirations(3);
        counters.record_expirations(2);
        counters.record_rejection();

        let stats = counters.snapshot(4, 100, 50);
        assert_eq!(stats.expirations, 5);
        assert_eq!(stats.rejections, 1);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.available_memory(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = StatsCounters::default().snapshot(1, 12, 1024);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_entries"], 1);
        assert_eq!(json["used_memory"], 12);
        assert!(json["taken_at"].is_string());
    }
}
