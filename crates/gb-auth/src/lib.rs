//! # gb-auth
//!
//! Resolves an `Authorization: Bearer <jwt>` header to a
//! [`gb_core::identity::CallerIdentity`].
//!
//! Tokens are HS256 compact JWS signed with a shared secret. The subject is
//! the caller's email; the `scope` claim carries the role authority.

pub mod claims;
pub mod error;
pub mod token;

pub use claims::GradebookClaims;
pub use error::AuthError;
pub use token::{TokenVerifier, bearer_token, mint};
