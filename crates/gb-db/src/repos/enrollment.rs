//! Enrollment repository.

use gb_core::entities::Enrollment;
use gb_core::responses::EnrollmentDto;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::{get_i32, get_opt_string, parse_enum};

fn row_to_enrollment(row: &libsql::Row) -> Result<Enrollment, DatabaseError> {
    Ok(Enrollment {
        id: row.get::<i64>(0)?,
        section_no: row.get::<i64>(1)?,
        student_id: row.get::<i64>(2)?,
        grade: get_opt_string(row, 3)?,
    })
}

/// Joined projection used by listings and registrar notices.
const PROJECTION_SQL: &str = "SELECT e.id, e.grade, u.id, u.name, u.email, c.course_id, c.title,
        s.sec_id, s.section_no, s.building, s.room, s.times, c.credits, t.year, t.semester
     FROM enrollments e
     JOIN users u ON u.id = e.student_id
     JOIN sections s ON s.section_no = e.section_no
     JOIN courses c ON c.course_id = s.course_id
     JOIN terms t ON t.id = s.term_id";

fn row_to_projection(row: &libsql::Row) -> Result<EnrollmentDto, DatabaseError> {
    Ok(EnrollmentDto {
        enrollment_id: row.get::<i64>(0)?,
        grade: get_opt_string(row, 1)?,
        student_id: row.get::<i64>(2)?,
        name: row.get::<String>(3)?,
        email: row.get::<String>(4)?,
        course_id: row.get::<String>(5)?,
        title: row.get::<String>(6)?,
        section_id: get_i32(row, 7)?,
        section_no: row.get::<i64>(8)?,
        building: get_opt_string(row, 9)?,
        room: get_opt_string(row, 10)?,
        times: get_opt_string(row, 11)?,
        credits: get_i32(row, 12)?,
        year: get_i32(row, 13)?,
        semester: parse_enum(&row.get::<String>(14)?)?,
    })
}

pub async fn get_enrollment(conn: &Connection, id: i64) -> Result<Option<Enrollment>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, section_no, student_id, grade FROM enrollments WHERE id = ?1",
            [id],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_enrollment).transpose()
}

pub async fn enrollment_projection(
    conn: &Connection,
    id: i64,
) -> Result<Option<EnrollmentDto>, DatabaseError> {
    let mut rows = conn
        .query(&format!("{PROJECTION_SQL} WHERE e.id = ?1"), [id])
        .await?;
    rows.next().await?.as_ref().map(row_to_projection).transpose()
}

/// Enrollments of one section, by student name then enrollment id.
pub async fn enrollments_for_section(
    conn: &Connection,
    section_no: i64,
) -> Result<Vec<EnrollmentDto>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("{PROJECTION_SQL} WHERE e.section_no = ?1 ORDER BY u.name, e.id"),
            [section_no],
        )
        .await?;
    let mut enrollments = Vec::new();
    while let Some(row) = rows.next().await? {
        enrollments.push(row_to_projection(&row)?);
    }
    Ok(enrollments)
}

pub async fn set_letter_grade(
    conn: &Connection,
    id: i64,
    grade: Option<&str>,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute("UPDATE enrollments SET grade = ?1 WHERE id = ?2", libsql::params![grade, id])
        .await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

/// Enroll `student_id` in `section_no` unless already enrolled.
/// Returns `true` when a row was created.
pub async fn insert_enrollment_if_absent(
    conn: &Connection,
    section_no: i64,
    student_id: i64,
    grade: Option<&str>,
) -> Result<bool, DatabaseError> {
    let inserted = conn
        .execute(
            "INSERT INTO enrollments (section_no, student_id, grade) VALUES (?1, ?2, ?3)
             ON CONFLICT (section_no, student_id) DO NOTHING",
            libsql::params![section_no, student_id, grade],
        )
        .await?;
    Ok(inserted > 0)
}
