//! Expiring Map - a generic in-memory key-value map with a uniform TTL
//!
//! Entries expire a fixed time after their last write. Expired entries are
//! removed lazily by map operations and proactively by a background sweep.

pub mod config;
pub mod error;
pub mod map;
pub mod tasks;

pub use config::MapConfig;
pub use error::{MapError, Result};
pub use map::{ExpiringMap, MapStats};
