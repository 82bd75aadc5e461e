//! Runtime error types.

use thiserror::Error;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Adapter configuration deserialization failed.
    #[error("Failed to deserialize adapter config: {0}")]
    AdapterConfigDeserialize(String),

    /// Adapter error.
    #[error("Adapter error: {0}")]
    Adapter(#[from] courier_core::AdapterError),

    /// Transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] courier_core::TransportError),

    /// Adapter already registered.
    #[error("Adapter already registered: {0}")]
    AdapterExists(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
