//! Expiring Map Module
//!
//! Thread-safe public container: a mutex-guarded `Store` shared with a
//! background sweep task.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::map::{lock, MapStats, Store};
use crate::tasks::spawn_sweep_task;

// == Expiring Map ==
/// In-memory key-value map whose entries expire a fixed TTL after their last write.
///
/// Expired entries are removed lazily by every operation except `clear`, and
/// proactively by a background task that sweeps the whole map every
/// `sweep_interval`. Every operation, including each sweep, runs under one
/// mutex, so callers never observe a partially applied change.
///
/// The sweep task lives on the Tokio runtime the map was built in. It stops
/// on [`close`](Self::close) or when the map is dropped. Share the map
/// between threads with `Arc<ExpiringMap<K, V>>`.
///
/// # Example
///
/// ```rust,no_run
/// use expiring_map::ExpiringMap;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> expiring_map::Result<()> {
///     let sessions = ExpiringMap::new(Duration::from_secs(30), Duration::from_secs(1))?;
///     sessions.insert("token-1".to_string(), 42u64);
///     assert_eq!(sessions.lookup("token-1")?, 42);
///     Ok(())
/// }
/// ```
pub struct ExpiringMap<K, V> {
    /// Entries, shared with the sweep task
    store: Arc<Mutex<Store<K, V>>>,
    /// Period of the background sweep
    sweep_interval: Duration,
    /// Set to `true` to stop the sweep task
    shutdown_tx: watch::Sender<bool>,
    /// Handle of the sweep task
    sweeper: JoinHandle<()>,
}

impl<K, V> ExpiringMap<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    // == Constructor ==
    /// Creates an empty map and starts its sweep task.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of each entry from its last write
    /// * `sweep_interval` - Period of the background sweep
    ///
    /// # Errors
    /// - `InvalidConfig` if either duration is zero
    /// - `NoRuntime` if called outside a Tokio runtime
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        Self::with_config(MapConfig::new(ttl, sweep_interval))
    }

    /// Creates an empty map from a [`MapConfig`].
    pub fn with_config(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| MapError::NoRuntime)?;

        let store = Arc::new(Mutex::new(Store::new(config.ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweep_task(
            Arc::clone(&store),
            config.sweep_interval,
            shutdown_rx,
            &runtime,
        );

        debug!(
            ttl_ms = config.ttl.as_millis() as u64,
            sweep_interval_ms = config.sweep_interval.as_millis() as u64,
            "Expiring map created"
        );

        Ok(Self {
            store,
            sweep_interval: config.sweep_interval,
            shutdown_tx,
            sweeper,
        })
    }
}

impl<K, V> ExpiringMap<K, V>
where
    K: Eq + Hash,
{
    fn store(&self) -> MutexGuard<'_, Store<K, V>> {
        lock(&self.store)
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous value and restarting its TTL.
    pub fn insert(&self, key: K, value: V) {
        self.store().insert(key, value, Instant::now());
    }

    // == Lookup ==
    /// Returns a copy of the live value for `key`.
    ///
    /// Reading does not extend the entry's lifetime.
    pub fn lookup<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.store().get(key, Instant::now()).cloned()
    }

    /// Runs `f` on the live value for `key` while the map is locked.
    ///
    /// Keep `f` short: every other operation waits for it.
    pub fn lookup_with<Q, F, R>(&self, key: &Q, f: F) -> Result<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.store().get(key, Instant::now()).map(f)
    }

    // == Has ==
    /// Reports whether a live entry exists for `key`.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store().contains(key, Instant::now())
    }

    // == Remove ==
    /// Removes the live entry for `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store().remove(key, Instant::now())
    }

    // == Time To Live ==
    /// Remaining lifetime of the live entry for `key`.
    pub fn time_to_live<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store().ttl_remaining(key, Instant::now())
    }

    // == Length ==
    /// Number of live entries. Expired entries are purged before counting.
    pub fn len(&self) -> usize {
        self.store().len(Instant::now())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Clear ==
    /// Discards every entry at once.
    pub fn clear(&self) {
        self.store().clear();
    }

    // == Purge Expired ==
    /// Runs a cleanup pass now and returns how many entries it removed.
    pub fn purge_expired(&self) -> usize {
        self.store().purge_expired(Instant::now())
    }

    // == Stats ==
    pub fn stats(&self) -> MapStats {
        self.store().stats()
    }

    pub fn ttl(&self) -> Duration {
        self.store().ttl()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

impl<K, V> ExpiringMap<K, V> {
    // == Close ==
    /// Stops the background sweep. Idempotent.
    ///
    /// The map stays usable afterwards; expired entries are then only removed
    /// by foreground operations.
    pub fn close(&self) {
        if !self.shutdown_tx.send_replace(true) {
            debug!("Expiring map closed");
        }
    }

    /// Whether the sweep task is still running.
    ///
    /// Returns false once the task has stopped after `close`, or if it died.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_finished()
    }
}

impl<K, V> Drop for ExpiringMap<K, V> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<K, V> std::fmt::Debug for ExpiringMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringMap")
            .field("sweep_interval", &self.sweep_interval)
            .field("closed", &*self.shutdown_tx.borrow())
            .finish_non_exhaustive()
    }
}
