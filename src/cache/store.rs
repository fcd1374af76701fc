//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a memory budget and
//! lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::entry::current_timestamp_ns;
use crate::cache::stats::StatsCounters;
use crate::cache::{
    estimate_size, parse_capacity, CacheEntry, CacheStats, DEFAULT_MAX_MEMORY,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// State guarded by the cache lock.
#[derive(Debug)]
struct Inner<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Sum of the estimated sizes of all stored entries
    used_memory: u64,
    /// Memory budget in bytes
    max_memory: u64,
}

impl<V> Inner<V> {
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.used_memory -= entry.size;
        Some(entry)
    }
}

// == Cache ==
/// Thread-safe, memory-bounded cache with per-entry TTL.
///
/// All operations take `&self`; share the cache between threads with `Arc`.
/// Every path that mutates the table holds the exclusive lock, so the
/// capacity check and the insert it guards are atomic.
#[derive(Debug)]
pub struct Cache<V> {
    inner: RwLock<Inner<V>>,
    stats: StatsCounters,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates a cache with the budget given as a capacity string like `"10MB"`.
    ///
    /// A string without a recognized unit keeps the 1 GB default.
    ///
    /// # Errors
    /// `InvalidCapacitySpec` when a unit is recognized but the number is not a
    /// clean integer, e.g. `"k10KB"`.
    pub fn new(max_memory: &str) -> Result<Self> {
        let budget = match parse_capacity(max_memory)? {
            Some(bytes) => bytes,
            None => {
                warn!(
                    spec = max_memory,
                    "No recognized capacity unit, keeping default budget"
                );
                DEFAULT_MAX_MEMORY
            }
        };
        Ok(Self::with_max_memory_bytes(budget))
    }

    /// Creates a cache with a budget given directly in bytes.
    pub fn with_max_memory_bytes(max_memory: u64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                used_memory: 0,
                max_memory,
            }),
            stats: StatsCounters::default(),
        }
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.max_memory)
    }

    // == Set Max Memory ==
    /// Re-parses a capacity string and replaces the budget.
    ///
    /// Returns false only when a unit is recognized but the number fails to
    /// parse. Without a recognized unit the budget is left untouched and true
    /// is returned. Lowering the budget never evicts entries.
    pub fn set_max_memory(&self, size: &str) -> bool {
        match parse_capacity(size) {
            Ok(Some(bytes)) => {
                self.inner.write().max_memory = bytes;
                info!(max_memory = bytes, "Memory budget updated");
                true
            }
            Ok(None) => {
                debug!(spec = size, "No recognized capacity unit, budget unchanged");
                true
            }
            Err(err) => {
                warn!(%err, "Rejected capacity change");
                false
            }
        }
    }

    /// Returns the memory budget in bytes.
    pub fn max_memory(&self) -> u64 {
        self.inner.read().max_memory
    }

    /// Returns the estimated bytes currently billed against the budget.
    pub fn used_memory(&self) -> u64 {
        self.inner.read().used_memory
    }

    // == Delete ==
    /// Removes an entry by key, returning whether it was present.
    pub fn del(&self, key: &str) -> bool {
        self.inner.write().remove(key).is_some()
    }

    // == Exists ==
    /// Returns whether the key is in the table.
    ///
    /// No expiry check is made: an expired entry not yet reaped by `get` or
    /// `purge_expired` still reports true.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    // == Flush ==
    /// Discards every entry. Always returns true.
    pub fn flush(&self) -> bool {
        let mut inner = self.inner.write();
        let dropped = inner.entries.len();
        inner.entries = HashMap::new();
        inner.used_memory = 0;
        drop(inner);

        info!(dropped, "Cache flushed");
        true
    }

    // == Keys ==
    /// Returns the number of entries, expired-but-unreaped ones included.
    pub fn keys(&self) -> u64 {
        self.len() as u64
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    // == TTL ==
    /// Returns the remaining lifetime of a key without reaping it.
    ///
    /// `None` if absent, `Some(None)` if permanent, `Some(Some(ZERO))` if
    /// expired but still resident.
    pub fn ttl(&self, key: &str) -> Option<Option<Duration>> {
        self.inner
            .read()
            .entries
            .get(key)
            .map(CacheEntry::ttl_remaining)
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = current_timestamp_ns();
        let mut inner = self.inner.write();
        let before = inner.entries.len();
        let mut released = 0;

        inner.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                released += entry.size;
                false
            } else {
                true
            }
        });
        inner.used_memory -= released;
        let removed = before - inner.entries.len();
        drop(inner);

        self.stats.record_expirations(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        self.stats
            .snapshot(inner.entries.len(), inner.used_memory, inner.max_memory)
    }

    /// Removes `key` if it is still expired once the exclusive lock is held.
    ///
    /// The entry may have been replaced between the shared read that saw it
    /// expire and this call.
    fn reap_expired(&self, key: &str) {
        let mut inner = self.inner.write();
        let expired = inner
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired());
        if expired {
            inner.remove(key);
            drop(inner);
            self.stats.record_expirations(1);
            debug!(key, "Reaped expired entry");
        }
    }
}

impl<V: Serialize> Cache<V> {
    // == Set ==
    /// Stores a value, expiring `ttl` from now (`Duration::ZERO` = never).
    ///
    /// Best effort: a value that cannot be serialized for sizing, or that
    /// would push usage past the budget, is silently dropped. The return value
    /// reports whether the write took effect and may be ignored.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) -> bool {
        self.try_set(key, value, ttl).is_ok()
    }

    /// Stores a value like [`Cache::set`], reporting why a write was declined.
    ///
    /// If the key already exists, the value and expiry are replaced and the
    /// old entry's size is credited back before the budget check.
    ///
    /// # Errors
    /// - `Serialization` if the value cannot be sized
    /// - `CapacityExceeded` if the write would exceed the budget
    pub fn try_set(&self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()> {
        let key = key.into();
        let size = estimate_size(&value).inspect_err(|err| {
            self.stats.record_rejection();
            debug!(key = %key, %err, "Dropped unserializable value");
        })?;
        let entry = CacheEntry::new(value, size, ttl);

        let mut inner = self.inner.write();
        let old_size = inner.entries.get(&key).map_or(0, |old| old.size);
        let base = inner.used_memory - old_size;
        let projected = base.saturating_add(size);

        if projected > inner.max_memory {
            let available = inner.max_memory.saturating_sub(base);
            drop(inner);
            self.stats.record_rejection();
            debug!(key = %key, size, available, "Dropped write over memory budget");
            return Err(CacheError::CapacityExceeded {
                requested: size,
                available,
            });
        }

        inner.entries.insert(key, entry);
        inner.used_memory = projected;
        Ok(())
    }
}

impl<V: Clone> Cache<V> {
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. An expired entry is
    /// removed under the exclusive lock and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let inner = self.inner.read();
            match inner.entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired() => {
                    self.stats.record_hit();
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        self.reap_expired(key);
        self.stats.record_miss();
        None
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::with_max_memory_bytes(DEFAULT_MAX_MEMORY)
    }
}
