//! Backend call failure taxonomy.
//!
//! Every failure here is recoverable: the engine catches it at the call
//! boundary, keeps the last good state, and surfaces an alert. Nothing
//! propagates to the rendering layer unhandled.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Login rejected or token no longer accepted.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success status from an endpoint.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
