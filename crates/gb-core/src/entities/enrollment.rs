use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student's membership in a section.
///
/// Created by the external enrollment process; this crate only reads it and
/// updates `grade`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i64,
    pub section_no: i64,
    pub student_id: i64,
    /// Course-level letter grade (`"A"`, `"B+"`, ...). `None` = not assigned.
    pub grade: Option<String>,
}
