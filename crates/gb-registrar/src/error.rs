//! Registrar delivery error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrarError {
    /// HTTP transport error (connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registrar returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registrar.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The registrar returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The notice could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RegistrarError {
    /// Whether another attempt could succeed.
    ///
    /// Connection failures, timeouts, 5xx and 429 are transient. Any other
    /// 4xx means the registrar rejected the notice itself.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Encode(_) => false,
        }
    }
}
