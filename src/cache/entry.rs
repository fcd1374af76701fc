//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Estimated serialized size in bytes, billed against the budget
    pub size: u64,
    /// Expiration timestamp (Unix nanoseconds), 0 = no expiration
    pub expire_at: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// A zero `ttl` makes the entry permanent.
    pub fn new(value: V, size: u64, ttl: Duration) -> Self {
        Self {
            value,
            size,
            expire_at: expiry_from_ttl(ttl, current_timestamp_ns()),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now` (Unix nanoseconds).
    ///
    /// An entry stays live while `now < expire_at`; it is expired from the
    /// expiration instant onwards.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expire_at != 0 && now >= self.expire_at
    }

    /// Checks if the entry has expired against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ns())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        if self.expire_at == 0 {
            return None;
        }
        let remaining = self.expire_at.saturating_sub(current_timestamp_ns());
        Some(Duration::from_nanos(remaining.max(0) as u64))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in nanoseconds.
pub fn current_timestamp_ns() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos();
    i64::try_from(nanos).unwrap_or(i64::MAX)
}

/// Converts a relative TTL into an absolute expiry, saturating on overflow.
fn expiry_from_ttl(ttl: Duration, now: i64) -> i64 {
    if ttl.is_zero() {
        return 0;
    }
    let ttl_ns = i64::try_from(ttl.as_nanos()).unwrap_or(i64::MAX);
    now.saturating_add(ttl_ns)
}
