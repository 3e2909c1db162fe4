use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A platform user. `email` is unique and doubles as the login identity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}
