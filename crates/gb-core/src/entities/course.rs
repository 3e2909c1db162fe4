use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A catalog course, keyed by its course id (e.g. `cst438`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub credits: i32,
}
