use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One offering of a course in a term.
///
/// `instructor_email` is the only ownership anchor in the model: every
/// assignment, enrollment, and grade beneath the section is owned by
/// whoever this field names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Section {
    /// Surrogate key used in routes.
    pub section_no: i64,
    pub course_id: String,
    pub term_id: i64,
    /// Section number within the course (display only).
    pub sec_id: i32,
    pub building: Option<String>,
    pub room: Option<String>,
    pub times: Option<String>,
    pub instructor_email: String,
}
