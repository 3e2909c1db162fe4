//! Roster snapshot import.
//!
//! Terms, courses, users, sections and enrollments are owned by the
//! institution's enrollment process. A roster file is how that data reaches
//! the gradebook store; importing the same file twice changes nothing.

use chrono::NaiveDate;
use gb_core::entities::{Course, Section};
use gb_core::enums::{Role, Semester};
use gb_core::errors::CoreError;
use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::repos::{course, enrollment, section, term, user};
use crate::service::GradebookService;
use crate::workflows::finish;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    #[serde(default)]
    pub terms: Vec<RosterTerm>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub users: Vec<RosterUser>,
    #[serde(default)]
    pub sections: Vec<RosterSection>,
    #[serde(default)]
    pub enrollments: Vec<RosterEnrollment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterTerm {
    pub year: i32,
    pub semester: Semester,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A section, with its term named by year and semester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterSection {
    pub section_no: i64,
    pub course_id: String,
    pub year: i32,
    pub semester: Semester,
    pub sec_id: i32,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub times: Option<String>,
    pub instructor_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEnrollment {
    pub section_no: i64,
    pub student_email: String,
    /// Initial letter grade; ignored when the enrollment already exists.
    #[serde(default)]
    pub grade: Option<String>,
}

/// Counts of what an import touched.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub terms: usize,
    pub courses: usize,
    pub users: usize,
    pub sections: usize,
    pub enrollments_created: usize,
}

async fn apply(conn: &Connection, roster: &Roster) -> Result<ImportSummary, ServiceError> {
    let mut summary = ImportSummary::default();

    for t in &roster.terms {
        if t.start_date > t.end_date {
            return Err(CoreError::Validation(format!(
                "term {} {} starts after it ends",
                t.year, t.semester
            ))
            .into());
        }
        term::upsert_term(conn, t.year, t.semester, t.start_date, t.end_date).await?;
        summary.terms += 1;
    }

    for c in &roster.courses {
        if c.credits <= 0 {
            return Err(CoreError::Validation(format!(
                "course {} must carry positive credits",
                c.course_id
            ))
            .into());
        }
        course::upsert_course(conn, c).await?;
        summary.courses += 1;
    }

    for u in &roster.users {
        user::upsert_user(conn, &u.name, &u.email, u.role).await?;
        summary.users += 1;
    }

    for s in &roster.sections {
        let t = term::find_term(conn, s.year, s.semester).await?.ok_or_else(|| {
            CoreError::Validation(format!(
                "section {} references unknown term {} {}",
                s.section_no, s.year, s.semester
            ))
        })?;
        if course::get_course(conn, &s.course_id).await?.is_none() {
            return Err(CoreError::Validation(format!(
                "section {} references unknown course '{}'",
                s.section_no, s.course_id
            ))
            .into());
        }
        section::upsert_section(
            conn,
            &Section {
                section_no: s.section_no,
                course_id: s.course_id.clone(),
                term_id: t.id,
                sec_id: s.sec_id,
                building: s.building.clone(),
                room: s.room.clone(),
                times: s.times.clone(),
                instructor_email: s.instructor_email.clone(),
            },
        )
        .await?;
        summary.sections += 1;
    }

    for e in &roster.enrollments {
        let student = user::find_user_by_email(conn, &e.student_email)
            .await?
            .ok_or_else(|| {
                CoreError::Validation(format!("enrollment references unknown user '{}'", e.student_email))
            })?;
        if section::get_section(conn, e.section_no).await?.is_none() {
            return Err(CoreError::Validation(format!(
                "enrollment of '{}' references unknown section {}",
                e.student_email, e.section_no
            ))
            .into());
        }
        if enrollment::insert_enrollment_if_absent(conn, e.section_no, student.id, e.grade.as_deref())
            .await?
        {
            summary.enrollments_created += 1;
        }
    }

    Ok(summary)
}

impl GradebookService {
    /// Upsert a roster snapshot in one transaction.
    ///
    /// # Errors
    ///
    /// `Validation` for dangling references or invalid terms and courses;
    /// nothing is written in that case.
    pub async fn import_roster(&self, roster: &Roster) -> Result<ImportSummary, ServiceError> {
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let result = apply(&tx, roster).await;
        let summary = finish(tx, result).await?;
        tracing::info!(
            terms = summary.terms,
            courses = summary.courses,
            users = summary.users,
            sections = summary.sections,
            enrollments_created = summary.enrollments_created,
            "roster imported"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{empty_service, scenario_roster};
    use gb_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn reimport_is_idempotent() {
        let (svc, _rx) = empty_service().await;
        let roster = scenario_roster();

        let first = svc.import_roster(&roster).await.unwrap();
        let second = svc.import_roster(&roster).await.unwrap();

        assert_eq!(first.enrollments_created, roster.enrollments.len());
        assert_eq!(second.enrollments_created, 0);
        assert_eq!(second.sections, roster.sections.len());
    }

    #[tokio::test]
    async fn dangling_reference_rolls_back_everything() {
        let (svc, _rx) = empty_service().await;
        let mut roster = scenario_roster();
        roster.enrollments.push(RosterEnrollment {
            section_no: 1,
            student_email: "ghost@csumb.edu".into(),
            grade: None,
        });

        let err = svc.import_roster(&roster).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let conn = svc.db().conn().await;
        assert!(section::get_section(&conn, 1).await.unwrap().is_none());
    }

    #[test]
    fn roster_parses_from_json() {
        let json = serde_json::json!({
            "terms": [{"year": 2025, "semester": "Fall", "start_date": "2025-09-01", "end_date": "2025-12-15"}],
            "users": [{"name": "ted", "email": "ted@csumb.edu", "role": "instructor"}]
        });
        let roster: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(roster.terms[0].semester, Semester::Fall);
        assert_eq!(roster.users[0].role, Role::Instructor);
        assert!(roster.sections.is_empty());
    }
}
