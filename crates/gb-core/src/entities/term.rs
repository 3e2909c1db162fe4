use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Semester;

/// An academic term. `start_date <= end_date` is enforced by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Term {
    pub id: i64,
    pub year: i32,
    pub semester: Semester,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Term {
    /// Whether `date` falls inside the term, both bounds inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
