//! Error types for the status transport.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for status fetch operations.
pub type StatusResult<T> = Result<T, StatusError>;

/// Errors surfaced by a single status fetch.
///
/// The collector treats every variant as one opaque fetch failure; the
/// split exists for logging and tests.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("failed to connect to control socket: {0}")]
    Connect(#[source] std::io::Error),

    #[error("http handshake failed: {0}")]
    Handshake(#[source] hyper::Error),

    #[error("status request failed: {0}")]
    Request(#[source] hyper::Error),

    #[error("control API returned {0}")]
    HttpStatus(http::StatusCode),

    #[error("failed to read status body: {0}")]
    Body(#[source] hyper::Error),

    #[error("failed to decode status body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("status fetch timed out after {0:?}")]
    Timeout(Duration),
}
