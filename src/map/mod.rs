//! Map Module
//!
//! Provides the expiring key-value map and the storage engine beneath it.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::Entry;
pub use expiring::ExpiringMap;
pub use stats::MapStats;
pub use store::Store;

pub(crate) use store::lock;
