//! Wire projections returned by the HTTP surface.
//!
//! Field names are camelCase on the wire (`dueDate`, `secNo`, ...) so that
//! existing gradebook front ends keep working unchanged.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::format_date;
use crate::entities::{Assignment, Course, Enrollment, Section, Term, User};
use crate::enums::Semester;

/// A section taught by the calling instructor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub sec_no: i64,
    pub year: i32,
    pub semester: Semester,
    pub course_id: String,
    pub title: String,
    pub sec_id: i32,
    pub building: Option<String>,
    pub room: Option<String>,
    pub times: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
}

impl SectionDto {
    #[must_use]
    pub fn project(section: &Section, course: &Course, term: &Term, instructor_name: &str) -> Self {
        Self {
            sec_no: section.section_no,
            year: term.year,
            semester: term.semester,
            course_id: course.course_id.clone(),
            title: course.title.clone(),
            sec_id: section.sec_id,
            building: section.building.clone(),
            room: section.room.clone(),
            times: section.times.clone(),
            instructor_name: instructor_name.to_string(),
            instructor_email: section.instructor_email.clone(),
        }
    }
}

/// An assignment as seen by its instructor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDto {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub course_id: String,
    pub sec_id: i32,
    pub sec_no: i64,
}

impl AssignmentDto {
    #[must_use]
    pub fn project(assignment: &Assignment, section: &Section) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title.clone(),
            due_date: format_date(assignment.due_date),
            course_id: section.course_id.clone(),
            sec_id: section.sec_id,
            sec_no: section.section_no,
        }
    }
}

/// An assignment as seen by an enrolled student, with their score if graded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStudentDto {
    pub assignment_id: i64,
    pub title: String,
    pub due_date: NaiveDate,
    pub course_id: String,
    pub sec_id: i32,
    pub score: Option<i64>,
}

/// An enrollment row with student identity and section display fields.
///
/// Also the payload of every registrar notice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub enrollment_id: i64,
    pub grade: Option<String>,
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub course_id: String,
    pub title: String,
    pub section_id: i32,
    pub section_no: i64,
    pub building: Option<String>,
    pub room: Option<String>,
    pub times: Option<String>,
    pub credits: i32,
    pub year: i32,
    pub semester: Semester,
}

impl EnrollmentDto {
    #[must_use]
    pub fn project(
        enrollment: &Enrollment,
        student: &User,
        section: &Section,
        course: &Course,
        term: &Term,
    ) -> Self {
        Self {
            enrollment_id: enrollment.id,
            grade: enrollment.grade.clone(),
            student_id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            course_id: course.course_id.clone(),
            title: course.title.clone(),
            section_id: section.sec_id,
            section_no: section.section_no,
            building: section.building.clone(),
            room: section.room.clone(),
            times: section.times.clone(),
            credits: course.credits,
            year: term.year,
            semester: term.semester,
        }
    }
}

/// A student's score on one assignment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradeDto {
    pub grade_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub assignment_title: String,
    pub course_id: String,
    pub section_id: i32,
    pub score: Option<i64>,
}

/// Summary of a batch update that ran to completion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Items written to the store.
    pub persisted: usize,
    /// Registrar notices handed to the notifier queue.
    pub notices_queued: usize,
}
