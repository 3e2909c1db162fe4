//! Request bodies accepted by the mutation endpoints.
//!
//! Unknown fields are ignored, so clients may send back a full projection
//! (e.g. a `GradeDto`) with only the mutable field changed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `POST /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub title: String,
    pub due_date: String,
    pub sec_no: i64,
    /// When present, must match the section's course.
    #[serde(default)]
    pub course_id: Option<String>,
    /// When present, must match the section's `sec_id`.
    #[serde(default)]
    pub sec_id: Option<i32>,
}

/// `PUT /assignments`. Only `title` and `due_date` change; the other
/// identifiers, when supplied, must describe the assignment's current
/// section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub sec_id: Option<i32>,
    #[serde(default)]
    pub sec_no: Option<i64>,
}

/// One item of `PUT /grades`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradeScoreUpdate {
    pub grade_id: i64,
    pub score: Option<i64>,
}

/// One item of `PUT /enrollments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentGradeUpdate {
    pub enrollment_id: i64,
    pub grade: Option<String>,
}
