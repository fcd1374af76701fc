//! Background Tasks Module
//!
//! Contains optional background tasks that run alongside a cache.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
