//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries from a shared store.

use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::map::{lock, Store};

/// Spawns a task on `runtime` that runs the cleanup pass every `interval`.
///
/// The first pass happens one full interval after spawning. The task exits
/// once `shutdown` carries `true` or its sender is dropped.
///
/// # Arguments
/// * `store` - Store shared with the owning map
/// * `interval` - Period between cleanup passes
/// * `shutdown` - Receiver flipped to `true` when the owner closes
/// * `runtime` - Runtime the task is spawned on
pub fn spawn_sweep_task<K, V>(
    store: Arc<Mutex<Store<K, V>>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    runtime: &Handle,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    runtime.spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Expiry sweep started");

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = lock(&store);
                        let removed = guard.purge_expired(Instant::now());
                        (removed, guard.stored_len())
                    };

                    if removed > 0 {
                        debug!(removed, remaining, "Expiry sweep removed entries");
                    } else {
                        trace!(remaining, "Expiry sweep found nothing to remove");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Expiry sweep stopped");
    })
}
