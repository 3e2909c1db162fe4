//! Calendar-date parsing and term-bound checks for assignment due dates.

use chrono::NaiveDate;

use crate::entities::Term;
use crate::errors::CoreError;

/// Wire format for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `CoreError::Validation` if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::Validation(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

/// Render a date in wire format.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse `due_date` and check it lies inside `term`, both bounds inclusive.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the date is malformed or outside the term.
pub fn validate_due_date(due_date: &str, term: &Term) -> Result<NaiveDate, CoreError> {
    let due = parse_date(due_date)?;
    if !term.contains(due) {
        return Err(CoreError::Validation(format!(
            "due date {} must be within term dates {} to {}",
            format_date(due),
            format_date(term.start_date),
            format_date(term.end_date)
        )));
    }
    Ok(due)
}
