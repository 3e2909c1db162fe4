//! Error responses for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gb_auth::AuthError;
use gb_core::errors::{CoreError, ErrorKind};
use gb_db::ServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned in place of any store failure.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, expired or badly signed bearer token.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Unparsable body, query string or path segment.
    #[error("{0}")]
    BadRequest(String),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::Service(ServiceError::from(e))
    }
}

/// JSON error body: `{"status": 400, "errors": ["..."]}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: u16,
    pub errors: Vec<String>,
}

impl ApiError {
    /// Not-found and validation failures are both 400; ownership and role
    /// denials are 403.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(e) => match e.kind() {
                ErrorKind::NotFound | ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
            self.to_string()
        };

        let body = ErrorBody {
            status: status.as_u16(),
            errors: vec![message],
        };
        (status, Json(body)).into_response()
    }
}
