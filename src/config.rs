//! Configuration Module
//!
//! Handles loading and validating map parameters, optionally from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{MapError, Result};

/// Default TTL in milliseconds
const DEFAULT_TTL_MS: u64 = 300_000;
/// Default sweep interval in milliseconds
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 1_000;

/// Expiring map parameters.
///
/// Both durations are fixed for the lifetime of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Time an entry stays retrievable after its last write
    pub ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl MapConfig {
    /// Creates a config with explicit durations.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            ttl,
            sweep_interval,
        }
    }

    /// Creates a new MapConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `EXPIRING_MAP_TTL_MS` - TTL in milliseconds (default: 300000)
    /// - `EXPIRING_MAP_SWEEP_INTERVAL_MS` - Sweep period in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        Self {
            ttl: Duration::from_millis(millis_from_env("EXPIRING_MAP_TTL_MS", DEFAULT_TTL_MS)),
            sweep_interval: Duration::from_millis(millis_from_env(
                "EXPIRING_MAP_SWEEP_INTERVAL_MS",
                DEFAULT_SWEEP_INTERVAL_MS,
            )),
        }
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the sweep interval.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    // == Validate ==
    /// Rejects zero durations.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(MapError::InvalidConfig("ttl must be positive".to_string()));
        }
        if self.sweep_interval.is_zero() {
            return Err(MapError::InvalidConfig(
                "sweep interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
            sweep_interval: Duration::from_millis(DEFAULT_SWEEP_INTERVAL_MS),
        }
    }
}

fn millis_from_env(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = MapConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("EXPIRING_MAP_TTL_MS");
        env::remove_var("EXPIRING_MAP_SWEEP_INTERVAL_MS");

        let config = MapConfig::from_env();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_config_builders() {
        let config = MapConfig::default()
            .with_ttl(Duration::from_millis(100))
            .with_sweep_interval(Duration::from_millis(50));
        assert_eq!(
            config,
            MapConfig::new(Duration::from_millis(100), Duration::from_millis(50))
        );
    }

    #[test]
    fn test_config_rejects_zero_durations() {
        let zero_ttl = MapConfig::default().with_ttl(Duration::ZERO);
        assert!(matches!(
            zero_ttl.validate(),
            Err(MapError::InvalidConfig(_))
        ));

        let zero_sweep = MapConfig::default().with_sweep_interval(Duration::ZERO);
        assert!(matches!(
            zero_sweep.validate(),
            Err(MapError::InvalidConfig(_))
        ));
    }
}
