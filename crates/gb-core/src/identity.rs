use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Authenticated caller, as resolved from a bearer token.
///
/// Produced by `gb-auth`, consumed by the ownership guard and every
/// service operation. Contains only data fields, no token handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CallerIdentity {
    /// Login email; also the ownership key matched against
    /// `Section::instructor_email`.
    pub email: String,
    pub role: Role,
}

impl CallerIdentity {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    #[must_use]
    pub fn instructor(email: &str) -> Self {
        Self::new(email, Role::Instructor)
    }

    #[must_use]
    pub fn student(email: &str) -> Self {
        Self::new(email, Role::Student)
    }
}
