//! Bearer-token verification settings.

use serde::{Deserialize, Serialize};

/// Default clock-skew allowance when checking `exp`.
const fn default_leeway_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 shared secret used to verify (and, in development, mint) tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Expected `iss` claim. Empty = not checked.
    #[serde(default)]
    pub issuer: String,

    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: String::new(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

impl AuthConfig {
    /// A secret is required before the server may accept requests.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    #[must_use]
    pub fn expected_issuer(&self) -> Option<&str> {
        if self.issuer.is_empty() {
            None
        } else {
            Some(&self.issuer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert!(config.expected_issuer().is_none());
        assert_eq!(config.leeway_secs, 30);
    }
}
