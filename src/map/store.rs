//! Entry Store Module
//!
//! Unsynchronized storage engine: a HashMap of timestamped entries plus the
//! cleanup pass. `ExpiringMap` wraps it in a mutex shared with the sweep task.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{MapError, Result};
use crate::map::{Entry, MapStats};

// == Store ==
/// Key-value storage with a uniform TTL.
///
/// Every method takes the current instant explicitly; callers decide the clock.
#[derive(Debug)]
pub struct Store<K, V> {
    /// Key-value storage
    entries: HashMap<K, Entry<V>>,
    /// Activity counters
    stats: MapStats,
    /// Uniform TTL for every entry
    ttl: Duration,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: MapStats::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Insert ==
    /// Stores `value` under `key`, stamped with `now`.
    ///
    /// An existing entry is replaced outright: both value and timestamp.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, Entry::new(value, now));
        self.purge_expired(now);
    }

    // == Get ==
    /// Returns a reference to the live value for `key`.
    ///
    /// Runs a cleanup pass first and does not refresh the entry.
    pub fn get<Q>(&mut self, key: &Q, now: Instant) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired(now);
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Ok(&entry.value)
            }
            None => {
                self.stats.record_miss();
                Err(MapError::NotFound)
            }
        }
    }

    // == Contains ==
    /// Runs a cleanup pass, then reports whether `key` is present.
    pub fn contains<Q>(&mut self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired(now);
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Runs a cleanup pass, then removes `key` and hands its value back.
    pub fn remove<Q>(&mut self, key: &Q, now: Instant) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired(now);
        let entry = self.entries.remove(key).ok_or(MapError::NotFound)?;
        self.stats.set_total_entries(self.entries.len());
        Ok(entry.value)
    }

    // == Time To Live ==
    /// Remaining lifetime of the live entry for `key`, if any.
    pub fn ttl_remaining<Q>(&mut self, key: &Q, now: Instant) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired(now);
        self.entries
            .get(key)
            .map(|entry| entry.ttl_remaining(self.ttl, now))
    }

    // == Length ==
    /// Runs a cleanup pass, then counts the remaining entries.
    pub fn len(&mut self, now: Instant) -> usize {
        self.purge_expired(now);
        self.entries.len()
    }

    // == Clear ==
    /// Discards every entry. No cleanup pass needed.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> MapStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Purge Expired ==
    /// The cleanup pass: removes every entry older than the TTL as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Entry count without a cleanup pass, expired-but-unswept entries included.
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }
}

// == Lock ==
/// Locks a shared store, recovering the data if a previous holder panicked.
pub(crate) fn lock<K, V>(store: &Mutex<Store<K, V>>) -> MutexGuard<'_, Store<K, V>> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
