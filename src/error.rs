//! Error types for the expiring map
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Map Error Enum ==
/// Unified error type for the expiring map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Key is absent or its entry has expired
    #[error("Key not found")]
    NotFound,

    /// Construction parameters were rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The map was built outside a Tokio runtime and cannot start its sweep task
    #[error("No Tokio runtime available to run the sweep task")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the expiring map.
pub type Result<T> = std::result::Result<T, MapError>;
