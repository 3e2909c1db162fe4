use chrono::{DateTime, Utc};
use gb_core::enums::Role;
use gb_core::identity::CallerIdentity;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Payload of a gradebook bearer token.
///
/// `sub` is the login email and `scope` the role authority
/// (`ROLE_INSTRUCTOR`, `ROLE_STUDENT`, `ROLE_ADMIN`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradebookClaims {
    pub sub: String,
    pub scope: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Display name, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GradebookClaims {
    /// Claims for `email` holding `role`, valid for `ttl` from now.
    #[must_use]
    pub fn new(email: &str, role: Role, ttl: chrono::TimeDelta) -> Self {
        let now = Utc::now();
        Self {
            sub: email.to_string(),
            scope: role.scope().to_string(),
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
            iss: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.iss = Some(issuer.to_string());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// `exp` as a timestamp; `None` if out of range.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Convert to the identity consumed by the ownership guard.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownScope` if `scope` names no known role, or
    /// `AuthError::Malformed` if `sub` is empty.
    pub fn to_identity(&self) -> Result<CallerIdentity, AuthError> {
        if self.sub.trim().is_empty() {
            return Err(AuthError::Malformed("empty subject".into()));
        }
        let role = self
            .scope
            .split_whitespace()
            .find_map(Role::from_scope)
            .ok_or_else(|| AuthError::UnknownScope(self.scope.clone()))?;
        Ok(CallerIdentity::new(self.sub.clone(), role))
    }
}
