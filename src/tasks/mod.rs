//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a map.
//!
//! # Tasks
//! - Expiry Sweep: Removes expired entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
