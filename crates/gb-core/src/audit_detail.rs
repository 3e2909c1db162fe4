//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob recording
//! the before/after values of the change.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::ScoreChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScoreChangedDetail {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// Detail for `AuditAction::LetterGradeChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LetterGradeChangedDetail {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Detail for assignment `Created` / `Updated` / `Deleted`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssignmentDetail {
    pub section_no: i64,
    pub title: String,
    pub due_date: String,
    /// Grade rows removed along with a deleted assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grades_removed: Option<u64>,
}
