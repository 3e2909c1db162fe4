use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use gb_auth::{GradebookClaims, mint};
use gb_config::{ConfigError, GradebookConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TokenArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MintedToken {
    token: String,
    subject: String,
    scope: String,
    expires_at: Option<DateTime<Utc>>,
}

/// Handle `gbd token`.
pub fn handle(args: &TokenArgs, config: &GradebookConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let minted = mint_token(args, config)?;
    output(&minted, flags.format)
}

fn mint_token(args: &TokenArgs, config: &GradebookConfig) -> anyhow::Result<MintedToken> {
    if !config.auth.is_configured() {
        return Err(ConfigError::NotConfigured {
            section: "auth".into(),
        })
        .context("set GRADEBOOK_AUTH__JWT_SECRET to mint tokens");
    }
    anyhow::ensure!(args.ttl_secs > 0, "--ttl-secs must be positive");

    let mut claims = GradebookClaims::new(&args.email, args.role, TimeDelta::seconds(args.ttl_secs));
    if let Some(issuer) = config.auth.expected_issuer() {
        claims = claims.with_issuer(issuer);
    }
    if let Some(name) = &args.name {
        claims = claims.with_name(name);
    }

    let token = mint(config.auth.jwt_secret.as_bytes(), &claims).context("failed to sign token")?;
    Ok(MintedToken {
        token,
        subject: claims.sub.clone(),
        scope: claims.scope.clone(),
        expires_at: claims.expires_at(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_auth::TokenVerifier;
    use gb_core::enums::Role;
    use pretty_assertions::assert_eq;

    fn args(role: Role) -> TokenArgs {
        TokenArgs {
            email: "ted@csumb.edu".into(),
            role,
            name: Some("ted".into()),
            ttl_secs: 600,
        }
    }

    #[test]
    fn minted_token_verifies_with_configured_secret() {
        let mut config = GradebookConfig::default();
        config.auth.jwt_secret = "dev-secret".into();
        config.auth.issuer = "gradebook".into();

        let minted = mint_token(&args(Role::Instructor), &config).unwrap();
        let verifier = TokenVerifier::new("dev-secret", Some("gradebook"), 0).unwrap();
        let identity = verifier.verify(&minted.token).unwrap().to_identity().unwrap();

        assert_eq!(identity.email, "ted@csumb.edu");
        assert_eq!(identity.role, Role::Instructor);
        assert_eq!(minted.scope, "ROLE_INSTRUCTOR");
    }

    #[test]
    fn minting_without_secret_fails() {
        let err = mint_token(&args(Role::Student), &GradebookConfig::default()).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }
}
