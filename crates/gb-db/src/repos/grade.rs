//! Grade repository.
//!
//! Grade rows are materialized lazily, one per (enrollment, assignment)
//! pair. [`ensure_grades_for_assignment`] is the only place they are
//! created; the UNIQUE constraint makes it safe to race.

use gb_core::entities::Grade;
use gb_core::responses::GradeDto;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::get_i32;

fn row_to_grade(row: &libsql::Row) -> Result<Grade, DatabaseError> {
    Ok(Grade {
        id: row.get::<i64>(0)?,
        enrollment_id: row.get::<i64>(1)?,
        assignment_id: row.get::<i64>(2)?,
        score: row.get::<Option<i64>>(3)?,
    })
}

pub async fn get_grade(conn: &Connection, id: i64) -> Result<Option<Grade>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, enrollment_id, assignment_id, score FROM grades WHERE id = ?1",
            [id],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_grade).transpose()
}

/// Create a null-score grade for every enrollment of `section_no` that has
/// none for `assignment_id`. Returns the number of rows created.
pub async fn ensure_grades_for_assignment(
    conn: &Connection,
    assignment_id: i64,
    section_no: i64,
) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute(
            "INSERT INTO grades (enrollment_id, assignment_id, score)
             SELECT e.id, ?1, NULL FROM enrollments e WHERE e.section_no = ?2
             ON CONFLICT (enrollment_id, assignment_id) DO NOTHING",
            libsql::params![assignment_id, section_no],
        )
        .await?)
}

/// Grades for one assignment, by student name then enrollment id.
pub async fn grades_for_assignment(
    conn: &Connection,
    assignment_id: i64,
) -> Result<Vec<GradeDto>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT g.id, u.name, u.email, a.title, s.course_id, s.sec_id, g.score
             FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             JOIN users u ON u.id = e.student_id
             JOIN assignments a ON a.id = g.assignment_id
             JOIN sections s ON s.section_no = a.section_no
             WHERE g.assignment_id = ?1
             ORDER BY u.name, e.id",
            [assignment_id],
        )
        .await?;
    let mut grades = Vec::new();
    while let Some(row) = rows.next().await? {
        grades.push(GradeDto {
            grade_id: row.get::<i64>(0)?,
            student_name: row.get::<String>(1)?,
            student_email: row.get::<String>(2)?,
            assignment_title: row.get::<String>(3)?,
            course_id: row.get::<String>(4)?,
            section_id: get_i32(&row, 5)?,
            score: row.get::<Option<i64>>(6)?,
        });
    }
    Ok(grades)
}

pub async fn set_score(conn: &Connection, id: i64, score: Option<i64>) -> Result<(), DatabaseError> {
    let changed = conn
        .execute("UPDATE grades SET score = ?1 WHERE id = ?2", libsql::params![score, id])
        .await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

/// Remove every grade of `assignment_id`. Returns the number removed.
pub async fn delete_for_assignment(conn: &Connection, assignment_id: i64) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute("DELETE FROM grades WHERE assignment_id = ?1", [assignment_id])
        .await?)
}
