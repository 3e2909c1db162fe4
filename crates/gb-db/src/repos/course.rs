//! Course repository.

use gb_core::entities::Course;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::get_i32;

fn row_to_course(row: &libsql::Row) -> Result<Course, DatabaseError> {
    Ok(Course {
        course_id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        credits: get_i32(row, 2)?,
    })
}

pub async fn get_course(conn: &Connection, course_id: &str) -> Result<Option<Course>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT course_id, title, credits FROM courses WHERE course_id = ?1",
            [course_id],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_course).transpose()
}

pub async fn upsert_course(conn: &Connection, course: &Course) -> Result<(), DatabaseError> {
    if course.credits <= 0 {
        return Err(DatabaseError::InvalidState(format!(
            "course {} must carry positive credits",
            course.course_id
        )));
    }
    conn.execute(
        "INSERT INTO courses (course_id, title, credits) VALUES (?1, ?2, ?3)
         ON CONFLICT (course_id) DO UPDATE SET title = excluded.title, credits = excluded.credits",
        libsql::params![course.course_id.as_str(), course.title.as_str(), course.credits],
    )
    .await?;
    Ok(())
}
