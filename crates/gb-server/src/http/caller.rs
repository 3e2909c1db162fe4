use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use gb_auth::AuthError;
use gb_core::identity::CallerIdentity;

use super::AppState;
use super::error::ApiError;

/// The authenticated caller of a request.
///
/// Rejects with 401 when the bearer token is missing or does not verify.
/// Role checks happen in the service, so a valid token with the wrong role
/// still reaches the handler and comes back 403.
pub struct Caller(pub CallerIdentity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| AuthError::Malformed("authorization header is not ASCII".into()))
            })
            .transpose()?;

        let identity = state.verifier.authenticate(header)?;
        Ok(Self(identity))
    }
}
