//! Assignment repository.

use chrono::NaiveDate;
use gb_core::dates::format_date;
use gb_core::entities::Assignment;
use gb_core::responses::AssignmentStudentDto;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::{get_i32, parse_stored_date};

const SELECT_COLS: &str = "id, section_no, title, due_date";

fn row_to_assignment(row: &libsql::Row) -> Result<Assignment, DatabaseError> {
    Ok(Assignment {
        id: row.get::<i64>(0)?,
        section_no: row.get::<i64>(1)?,
        title: row.get::<String>(2)?,
        due_date: parse_stored_date(&row.get::<String>(3)?)?,
    })
}

pub async fn get_assignment(conn: &Connection, id: i64) -> Result<Option<Assignment>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM assignments WHERE id = ?1"), [id])
        .await?;
    rows.next().await?.as_ref().map(row_to_assignment).transpose()
}

/// Assignments of one section, by due date then id.
pub async fn assignments_for_section(
    conn: &Connection,
    section_no: i64,
) -> Result<Vec<Assignment>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM assignments WHERE section_no = ?1 ORDER BY due_date, id"
            ),
            [section_no],
        )
        .await?;
    let mut assignments = Vec::new();
    while let Some(row) = rows.next().await? {
        assignments.push(row_to_assignment(&row)?);
    }
    Ok(assignments)
}

pub async fn insert_assignment(
    conn: &Connection,
    section_no: i64,
    title: &str,
    due_date: NaiveDate,
) -> Result<Assignment, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "INSERT INTO assignments (section_no, title, due_date) VALUES (?1, ?2, ?3)
                 RETURNING {SELECT_COLS}"
            ),
            libsql::params![section_no, title, format_date(due_date)],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_assignment(&row)
}

pub async fn update_assignment(
    conn: &Connection,
    id: i64,
    title: &str,
    due_date: NaiveDate,
) -> Result<Assignment, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "UPDATE assignments SET title = ?1, due_date = ?2 WHERE id = ?3
                 RETURNING {SELECT_COLS}"
            ),
            libsql::params![title, format_date(due_date), id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_assignment(&row)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_assignment(conn: &Connection, id: i64) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute("DELETE FROM assignments WHERE id = ?1", [id])
        .await?)
}

/// Assignments in every section the student is enrolled in for `term_id`,
/// with the student's score where a grade row exists. Ordered by due date.
pub async fn assignments_for_student(
    conn: &Connection,
    student_email: &str,
    term_id: i64,
) -> Result<Vec<AssignmentStudentDto>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT a.id, a.title, a.due_date, s.course_id, s.sec_id, g.score
             FROM assignments a
             JOIN sections s ON s.section_no = a.section_no
             JOIN enrollments e ON e.section_no = s.section_no
             JOIN users u ON u.id = e.student_id
             LEFT JOIN grades g ON g.enrollment_id = e.id AND g.assignment_id = a.id
             WHERE u.email = ?1 AND s.term_id = ?2
             ORDER BY a.due_date, a.id",
            libsql::params![student_email, term_id],
        )
        .await?;

    let mut assignments = Vec::new();
    while let Some(row) = rows.next().await? {
        assignments.push(AssignmentStudentDto {
            assignment_id: row.get::<i64>(0)?,
            title: row.get::<String>(1)?,
            due_date: parse_stored_date(&row.get::<String>(2)?)?,
            course_id: row.get::<String>(3)?,
            sec_id: get_i32(&row, 4)?,
            score: row.get::<Option<i64>>(5)?,
        });
    }
    Ok(assignments)
}
