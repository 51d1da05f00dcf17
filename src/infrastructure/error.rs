//! Infrastructure-level errors

use thiserror::Error;

/// Session or publish failure talking to one printer.
///
/// Scoped to a single printer: the dispatcher records it and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection to {host}:{port} failed: {message}")]
    Connect {
        host: String,
        port: u16,
        message: String,
    },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("publish to {topic} failed: {message}")]
    Publish { topic: String, message: String },

    #[error("disconnect failed: {0}")]
    Disconnect(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
