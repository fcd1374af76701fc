//! Size Estimation Module
//!
//! Estimates the memory footprint of a value from its serialized length.

use std::io;

use serde::Serialize;

use crate::error::Result;

/// Byte sink that only counts what is written to it.
#[derive(Debug, Default)]
struct ByteCounter {
    count: u64,
}

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.count += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// == Estimate Size ==
/// Returns the length in bytes of the value's JSON encoding.
///
/// The estimate is advisory. It ignores allocator overhead and the key, and
/// is only used to bill entries against the memory budget.
pub fn estimate_size<V: Serialize + ?Sized>(value: &V) -> Result<u64> {
    let mut counter = ByteCounter::default();
    serde_json::to_writer(&mut counter, value)?;
    Ok(counter.count)
}
