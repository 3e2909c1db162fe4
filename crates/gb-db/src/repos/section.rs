//! Section repository.

use gb_core::entities::Section;
use gb_core::responses::SectionDto;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::{get_i32, get_opt_string, parse_enum};

pub(crate) const SELECT_COLS: &str =
    "s.section_no, s.course_id, s.term_id, s.sec_id, s.building, s.room, s.times, s.instructor_email";

pub(crate) fn row_to_section(row: &libsql::Row) -> Result<Section, DatabaseError> {
    Ok(Section {
        section_no: row.get::<i64>(0)?,
        course_id: row.get::<String>(1)?,
        term_id: row.get::<i64>(2)?,
        sec_id: get_i32(row, 3)?,
        building: get_opt_string(row, 4)?,
        room: get_opt_string(row, 5)?,
        times: get_opt_string(row, 6)?,
        instructor_email: row.get::<String>(7)?,
    })
}

pub async fn get_section(conn: &Connection, section_no: i64) -> Result<Option<Section>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM sections s WHERE s.section_no = ?1"),
            [section_no],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_section).transpose()
}

/// Sections taught by `instructor_email` in `term_id`, projected for display.
///
/// The instructor name falls back to the email when no user row exists.
pub async fn sections_for_instructor(
    conn: &Connection,
    instructor_email: &str,
    term_id: i64,
) -> Result<Vec<SectionDto>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT s.section_no, t.year, t.semester, c.course_id, c.title, s.sec_id,
                    s.building, s.room, s.times, COALESCE(u.name, s.instructor_email), s.instructor_email
             FROM sections s
             JOIN courses c ON c.course_id = s.course_id
             JOIN terms t ON t.id = s.term_id
             LEFT JOIN users u ON u.email = s.instructor_email
             WHERE s.instructor_email = ?1 AND s.term_id = ?2
             ORDER BY c.course_id, s.sec_id, s.section_no",
            libsql::params![instructor_email, term_id],
        )
        .await?;

    let mut sections = Vec::new();
    while let Some(row) = rows.next().await? {
        sections.push(SectionDto {
            sec_no: row.get::<i64>(0)?,
            year: get_i32(&row, 1)?,
            semester: parse_enum(&row.get::<String>(2)?)?,
            course_id: row.get::<String>(3)?,
            title: row.get::<String>(4)?,
            sec_id: get_i32(&row, 5)?,
            building: get_opt_string(&row, 6)?,
            room: get_opt_string(&row, 7)?,
            times: get_opt_string(&row, 8)?,
            instructor_name: row.get::<String>(9)?,
            instructor_email: row.get::<String>(10)?,
        });
    }
    Ok(sections)
}

pub async fn upsert_section(conn: &Connection, section: &Section) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sections (section_no, course_id, term_id, sec_id, building, room, times, instructor_email)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT (section_no) DO UPDATE SET
            course_id = excluded.course_id, term_id = excluded.term_id, sec_id = excluded.sec_id,
            building = excluded.building, room = excluded.room, times = excluded.times,
            instructor_email = excluded.instructor_email",
        libsql::params![
            section.section_no,
            section.course_id.as_str(),
            section.term_id,
            section.sec_id,
            section.building.as_deref(),
            section.room.as_deref(),
            section.times.as_deref(),
            section.instructor_email.as_str()
        ],
    )
    .await?;
    Ok(())
}
