//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity string carries a unit but its number does not parse
    #[error("Invalid capacity spec: {0}")]
    InvalidCapacitySpec(String),

    /// Value could not be serialized for size estimation
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Write would push estimated usage past the memory budget
    #[error("Capacity exceeded: requested {requested} bytes, {available} available")]
    CapacityExceeded {
        /// Estimated size of the rejected value
        requested: u64,
        /// Bytes left in the budget at the time of the write
        available: u64,
    },
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidCapacitySpec("k10KB".to_string());
        assert_eq!(err.to_string(), "Invalid capacity spec: k10KB");

        let err = CacheError::CapacityExceeded {
            requested: 2050,
            available: 1012,
        };
        assert_eq!(
            err.to_string(),
            "Capacity exceeded: requested 2050 bytes, 1012 available"
        );
    }
}
