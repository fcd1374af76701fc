//! Capacity Module
//!
//! Parses human capacity strings such as `"10MB"` into a byte budget.

use crate::error::{CacheError, Result};

// == Units ==
/// One kilobyte in bytes
pub const KB: u64 = 1024;
/// One megabyte in bytes
pub const MB: u64 = 1024 * KB;
/// One gigabyte in bytes
pub const GB: u64 = 1024 * MB;

/// Recognized unit suffixes, in matching priority order.
const UNITS: [(&str, u64); 3] = [("GB", GB), ("MB", MB), ("KB", KB)];

// == Parse Capacity ==
/// Parses a `<integer><unit>` capacity string into bytes.
///
/// Unit tokens are case-sensitive and must terminate the string. When several
/// tokens could match, the longest one from the priority list wins.
///
/// # Returns
/// - `Ok(Some(bytes))` when a unit is recognized and the prefix is an integer
/// - `Ok(None)` when no recognized unit ends the string
/// - `Err(InvalidCapacitySpec)` when a unit is recognized but the prefix is
///   not a clean unsigned integer, or the product overflows
pub fn parse_capacity(spec: &str) -> Result<Option<u64>> {
    let matched = UNITS
        .iter()
        .filter(|(unit, _)| spec.ends_with(unit))
        .max_by_key(|(unit, _)| unit.len());

    let Some((unit, multiplier)) = matched else {
        return Ok(None);
    };

    let magnitude = &spec[..spec.len() - unit.len()];
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CacheError::InvalidCapacitySpec(spec.to_string()));
    }

    magnitude
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(*multiplier))
        .map(Some)
        .ok_or_else(|| CacheError::InvalidCapacitySpec(spec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_unit() {
        assert_eq!(parse_capacity("1KB").unwrap(), Some(1024));
        assert_eq!(parse_capacity("10MB").unwrap(), Some(10 * MB));
        assert_eq!(parse_capacity("2GB").unwrap(), Some(2 * GB));
        assert_eq!(parse_capacity("0KB").unwrap(), Some(0));
    }

    #[test]
    fn test_parse_non_numeric_prefix() {
        assert!(matches!(
            parse_capacity("k10KB"),
            Err(CacheError::InvalidCapacitySpec(_))
        ));
        assert!(parse_capacity("KB").is_err());
        assert!(parse_capacity("1.5MB").is_err());
        assert!(parse_capacity("-1GB").is_err());
        assert!(parse_capacity("+1GB").is_err());
        assert!(parse_capacity(" 1GB").is_err());
    }

    #[test]
    fn test_parse_unit_must_be_suffix() {
        assert_eq!(parse_capacity("10MBx").unwrap(), None);
        assert_eq!(parse_capacity("1024").unwrap(), None);
        assert_eq!(parse_capacity("").unwrap(), None);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(parse_capacity("10mb").unwrap(), None);
        assert_eq!(parse_capacity("10Mb").unwrap(), None);
    }

    #[test]
    fn test_embedded_unit_fails_numeric_parse() {
        // "MB" appears inside, but only the trailing "KB" is a unit
        assert!(parse_capacity("1MB1KB").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        let spec = format!("{}GB", u64::MAX);
        assert!(matches!(
            parse_capacity(&spec),
            Err(CacheError::InvalidCapacitySpec(_))
        ));
    }
}
