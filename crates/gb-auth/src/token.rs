//! HS256 bearer-token encoding and verification.

use gb_core::identity::CallerIdentity;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::GradebookClaims;
use crate::error::AuthError;

/// Clock-skew allowance is capped at one day.
const MAX_LEEWAY_SECS: u64 = 86_400;

/// Sign `claims` with `secret`. Used by the `token` subcommand and tests;
/// production tokens come from the identity provider.
///
/// # Errors
///
/// Returns `AuthError::InvalidSecret` for an empty secret, or
/// `AuthError::Encode` if the claims fail to serialize.
pub fn mint(secret: &[u8], claims: &GradebookClaims) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret("secret is empty".into()));
    }
    let key = EncodingKey::from_secret(secret);
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|error| AuthError::Encode(error.to_string()))
}

/// Extract the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` unless the value is `Bearer <token>`.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Verifies bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.validation.leeway)
            .finish()
    }
}

impl TokenVerifier {
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSecret` for an empty secret.
    pub fn new(secret: &str, issuer: Option<&str>, leeway_secs: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret("secret is empty".into()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs.min(MAX_LEEWAY_SECS);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.map(str::to_string),
        })
    }

    /// Check algorithm, signature, expiry and issuer, then return the claims.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` variant describing the first failed check.
    pub fn verify(&self, token: &str) -> Result<GradebookClaims, AuthError> {
        let header =
            jsonwebtoken::decode_header(token).map_err(|e| AuthError::Malformed(e.to_string()))?;
        if header.alg != Algorithm::HS256 {
            return Err(AuthError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let data = jsonwebtoken::decode::<GradebookClaims>(token, &self.key, &self.validation)
            .map_err(|error| self.classify(error))?;
        Ok(data.claims)
    }

    fn classify(&self, error: jsonwebtoken::errors::Error) -> AuthError {
        match error.kind() {
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            ErrorKind::ExpiredSignature => {
                tracing::debug!("rejected expired token");
                AuthError::TokenExpired
            }
            ErrorKind::InvalidIssuer => self.issuer_mismatch(),
            ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => self.issuer_mismatch(),
            ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm("HS256 expected".into()),
            _ => AuthError::Malformed(error.to_string()),
        }
    }

    fn issuer_mismatch(&self) -> AuthError {
        AuthError::IssuerMismatch {
            expected: self.issuer.clone().unwrap_or_default(),
        }
    }

    /// Resolve an `Authorization` header value to a caller identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the header is absent or malformed, or the token
    /// fails verification.
    pub fn authenticate(&self, header_value: Option<&str>) -> Result<CallerIdentity, AuthError> {
        let token = bearer_token(header_value.ok_or(AuthError::MissingToken)?)?;
        self.verify(token)?.to_identity()
    }
}
