//! Error type for MailPace operations.

use thiserror::Error;

/// Errors returned by the MailPace client.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Encoding the payload or decoding a response body failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server token contains characters not allowed in an HTTP header.
    #[error("server token is not a valid header value")]
    InvalidToken,

    /// `MAILPACE_SERVER_TOKEN` is unset or empty.
    #[error("MAILPACE_SERVER_TOKEN is not set or empty")]
    MissingToken,
}
