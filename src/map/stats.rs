//! Map Statistics Module
//!
//! Tracks lookup hits and misses and the number of entries removed by expiry.

use serde::Serialize;

// == Map Stats ==
/// Tracks map activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapStats {
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that signalled NotFound
    pub misses: u64,
    /// Number of entries removed by cleanup passes
    pub expired: u64,
    /// Number of entries currently stored
    pub total_entries: usize,
}

impl MapStats {
    // == Constructor ==
    /// Creates a new MapStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the lookup hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Adds `count` to the expired counter.
    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
