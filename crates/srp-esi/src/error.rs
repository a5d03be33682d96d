//! Resolver error types.

use thiserror::Error;

/// Errors that can occur when talking to ESI.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ESI returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by ESI.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an ESI response.
    #[error("parse error: {0}")]
    Parse(String),

    /// ESI returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
