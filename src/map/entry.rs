//! Map Entry Module
//!
//! Defines a stored value together with the instant of its last write.

use std::time::Duration;

use tokio::time::Instant;

// == Entry ==
/// A stored value and the time it was last written.
///
/// Reads never touch `written_at`; only an insert (new or overwrite) does.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Instant of creation or last overwrite
    pub written_at: Instant,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            written_at: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` as of `now`.
    ///
    /// Strictly greater-than: an entry whose age equals the TTL is still live.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.written_at) > ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime as of `now`, zero once the TTL has elapsed.
    pub fn ttl_remaining(&self, ttl: Duration, now: Instant) -> Duration {
        ttl.saturating_sub(now.saturating_duration_since(self.written_at))
    }
}
