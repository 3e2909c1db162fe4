use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("unsupported token algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    TokenExpired,

    #[error("token issuer mismatch, expected '{expected}'")]
    IssuerMismatch { expected: String },

    #[error("token scope '{0}' names no known role")]
    UnknownScope(String),

    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error("token encoding failed: {0}")]
    Encode(String),
}
