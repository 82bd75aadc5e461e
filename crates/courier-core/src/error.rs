//! Unified error types for the Courier core.
//!
//! Protocol-specific errors (builder validation, webhook authentication)
//! live in the adapter crates; this module holds the errors that cross
//! crate boundaries through the collaborator traits.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur in transport operations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The remote endpoint answered with a non-success status.
    #[error("HTTP {status} error: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as text.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// Failed to bind a listener.
    #[error("failed to bind {addr}: {reason}")]
    Bind {
        /// The address that could not be bound.
        addr: String,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Adapter Errors
// =============================================================================

/// Errors raised while constructing an adapter.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// The adapter configuration is unusable.
    #[error("invalid adapter configuration: {0}")]
    InvalidConfig(String),

    /// A transport the adapter depends on could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// =============================================================================
// Credential Errors
// =============================================================================

/// Errors raised while decoding a stored secret or token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The credential is not configured.
    #[error("credential '{name}' is not configured")]
    Missing {
        /// Name of the credential (e.g. `channel_access_token`).
        name: &'static str,
    },

    /// The stored value could not be decoded.
    #[error("credential could not be decoded: {0}")]
    Decode(String),
}

// =============================================================================
// Reply Errors
// =============================================================================

/// Errors surfaced by a [`Responder`](crate::Responder).
#[derive(Debug, Clone, Error)]
pub enum ReplyError {
    /// The reply body could not be serialized.
    #[error("failed to serialize reply: {0}")]
    Serialization(String),

    /// The platform call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for ReplyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// A failure inside one event's parse → bot → reply pipeline.
///
/// These never leave the pipeline: they are handed to the
/// [`ErrorSink`](crate::ErrorSink) and the sibling events carry on.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The bot logic returned an error.
    #[error("bot handler failed: {0:#}")]
    Bot(anyhow::Error),

    /// The access token needed for the reply was unavailable.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The reply could not be delivered.
    #[error(transparent)]
    Reply(#[from] ReplyError),

    /// The pipeline panicked.
    #[error("event pipeline panicked: {0}")]
    Panicked(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for adapter construction.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Result type for credential decoding.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Result type for reply dispatch.
pub type ReplyResult<T> = Result<T, ReplyError>;

/// Result type produced by bot logic.
pub type BotResult = anyhow::Result<crate::BotReply>;
