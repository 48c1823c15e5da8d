//! Expiring Map soak runner
//!
//! Keeps writing short-lived keys into an `ExpiringMap` and logs how the
//! map size settles as the sweep evicts them.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expiring_map::{ExpiringMap, MapConfig};

/// Number of writes between two progress reports
const REPORT_EVERY: u64 = 100;

/// Entry point for the soak runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load map configuration from environment variables
/// 3. Insert one key per write tick until Ctrl+C or SIGTERM
/// 4. Close the map and report final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expiring_map=info,expiring_map_soak=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MapConfig::from_env();
    info!(
        "Configuration loaded: ttl={:?}, sweep_interval={:?}",
        config.ttl, config.sweep_interval
    );

    let map: ExpiringMap<u64, String> =
        ExpiringMap::with_config(config).context("failed to build expiring map")?;

    let write_period = write_period(&config);
    let mut writes = interval(write_period);
    writes.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut next_key = 0u64;
    loop {
        tokio::select! {
            _ = writes.tick() => {
                map.insert(next_key, format!("value-{next_key}"));
                next_key += 1;

                if next_key % REPORT_EVERY == 0 {
                    let stats = map.stats();
                    info!(
                        written = next_key,
                        live = map.len(),
                        expired = stats.expired,
                        "Soak progress"
                    );
                }
            }
            result = &mut shutdown => {
                result?;
                break;
            }
        }
    }

    map.close();
    let stats = map.stats();
    info!(
        written = next_key,
        live = map.len(),
        expired = stats.expired,
        "Soak finished"
    );

    Ok(())
}

/// Writes ten keys per TTL, so the steady-state size stays near ten.
fn write_period(config: &MapConfig) -> Duration {
    (config.ttl / 10).max(Duration::from_millis(1))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> anyhow::Result<()> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .context("failed to install Ctrl+C handler")
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<anyhow::Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
            result
        }
        result = terminate => {
            info!("Received SIGTERM, shutting down...");
            result
        }
    }
}
