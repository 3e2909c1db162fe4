use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A graded piece of work belonging to exactly one section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assignment {
    pub id: i64,
    pub section_no: i64,
    pub title: String,
    pub due_date: NaiveDate,
}
