//! Transport-level and umbrella error types.

use thiserror::Error;

use chainweb3_types::DecodeError;

use crate::request::RpcError;

/// Failures of a provider to complete a round trip.
///
/// These are produced by transports and passed through the request manager
/// untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-2xx status, bad body).
    #[error("HTTP error: {0}")]
    Http(String),

    /// WebSocket connection/send/receive error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// IPC socket connection/read/write error.
    #[error("IPC error: {0}")]
    Ipc(String),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The transport was shut down while the request was in flight.
    #[error("Transport closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` for failures that a caller may reasonably retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::WebSocket(_) | Self::Ipc(_) | Self::Timeout { .. }
        )
    }
}

/// Any failure between building a request and holding a decoded entity.
#[derive(Debug, Error)]
pub enum Web3Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The node executed the call and answered with an error object.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
