//! Term repository.

use chrono::NaiveDate;
use gb_core::dates::format_date;
use gb_core::entities::Term;
use gb_core::enums::Semester;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::{get_i32, parse_enum, parse_stored_date};

const SELECT_COLS: &str = "id, year, semester, start_date, end_date";

fn row_to_term(row: &libsql::Row) -> Result<Term, DatabaseError> {
    Ok(Term {
        id: row.get::<i64>(0)?,
        year: get_i32(row, 1)?,
        semester: parse_enum(&row.get::<String>(2)?)?,
        start_date: parse_stored_date(&row.get::<String>(3)?)?,
        end_date: parse_stored_date(&row.get::<String>(4)?)?,
    })
}

pub async fn get_term(conn: &Connection, id: i64) -> Result<Option<Term>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM terms WHERE id = ?1"), [id])
        .await?;
    rows.next().await?.as_ref().map(row_to_term).transpose()
}

pub async fn find_term(
    conn: &Connection,
    year: i32,
    semester: Semester,
) -> Result<Option<Term>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM terms WHERE year = ?1 AND semester = ?2"),
            libsql::params![year, semester.as_str()],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_term).transpose()
}

/// Insert or refresh the term for `(year, semester)`; returns its id.
pub async fn upsert_term(
    conn: &Connection,
    year: i32,
    semester: Semester,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<i64, DatabaseError> {
    if start_date > end_date {
        return Err(DatabaseError::InvalidState(format!(
            "term {year} {semester} starts after it ends"
        )));
    }
    let mut rows = conn
        .query(
            "INSERT INTO terms (year, semester, start_date, end_date) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (year, semester) DO UPDATE SET start_date = excluded.start_date, end_date = excluded.end_date
             RETURNING id",
            libsql::params![
                year,
                semester.as_str(),
                format_date(start_date),
                format_date(end_date)
            ],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}
