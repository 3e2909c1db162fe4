use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student's score on one assignment, through one enrollment.
///
/// At most one row exists per `(enrollment_id, assignment_id)`; it is
/// materialized on first touch with a `None` score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Grade {
    pub id: i64,
    pub enrollment_id: i64,
    pub assignment_id: i64,
    pub score: Option<i64>,
}
