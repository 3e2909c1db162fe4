//! Read-only projections filtered by caller identity.

use gb_core::enums::{Role, Semester};
use gb_core::identity::CallerIdentity;
use gb_core::ownership::{OwnedTarget, require_role};
use gb_core::responses::{AssignmentDto, AssignmentStudentDto, SectionDto};

use crate::error::ServiceError;
use crate::ownership::authorize_target;
use crate::repos::{assignment, section, term};
use crate::service::GradebookService;

impl GradebookService {
    /// Sections the calling instructor teaches in a term. An unknown term
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// `Forbidden` for a non-instructor.
    pub async fn list_sections(
        &self,
        caller: &CallerIdentity,
        year: i32,
        semester: Semester,
    ) -> Result<Vec<SectionDto>, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;
        let Some(term) = term::find_term(&conn, year, semester).await? else {
            return Ok(Vec::new());
        };
        Ok(section::sections_for_instructor(&conn, &caller.email, term.id).await?)
    }

    /// Assignments of a section the caller teaches, by due date.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown section, `Forbidden` for a non-owner.
    pub async fn list_section_assignments(
        &self,
        caller: &CallerIdentity,
        section_no: i64,
    ) -> Result<Vec<AssignmentDto>, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;
        let section = authorize_target(&conn, caller, OwnedTarget::Section(section_no)).await?;
        let assignments = assignment::assignments_for_section(&conn, section_no).await?;
        Ok(assignments
            .iter()
            .map(|a| AssignmentDto::project(a, &section))
            .collect())
    }

    /// The calling student's assignments and scores for a term, by due date.
    ///
    /// # Errors
    ///
    /// `Forbidden` for a non-student.
    pub async fn list_student_assignments(
        &self,
        caller: &CallerIdentity,
        year: i32,
        semester: Semester,
    ) -> Result<Vec<AssignmentStudentDto>, ServiceError> {
        require_role(caller, Role::Student)?;
        let conn = self.db().conn().await;
        let Some(term) = term::find_term(&conn, year, semester).await? else {
            return Ok(Vec::new());
        };
        Ok(assignment::assignments_for_student(&conn, &caller.email, term.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{self, SAM, TED, TEDDY, scenario};
    use gb_core::errors::ErrorKind;
    use gb_core::requests::{CreateAssignment, GradeScoreUpdate};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn instructor_sees_only_own_sections() {
        let fx = scenario().await;

        let ted = fx
            .svc
            .list_sections(&CallerIdentity::instructor(TED), 2025, Semester::Fall)
            .await
            .unwrap();
        assert_eq!(ted.len(), 1);
        assert_eq!(ted[0].sec_no, helpers::SECTION_NO);
        assert_eq!(ted[0].instructor_name, "ted");

        let teddy = fx
            .svc
            .list_sections(&CallerIdentity::instructor(TEDDY), 2025, Semester::Fall)
            .await
            .unwrap();
        assert!(teddy.iter().all(|s| s.sec_no != helpers::SECTION_NO));

        let none = fx
            .svc
            .list_sections(&CallerIdentity::instructor(TED), 1999, Semester::Spring)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn section_assignments_are_owner_only() {
        let fx = scenario().await;
        let list = fx
            .svc
            .list_section_assignments(&CallerIdentity::instructor(TED), helpers::SECTION_NO)
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, helpers::ASSIGNMENT_ID);

        let err = fx
            .svc
            .list_section_assignments(&CallerIdentity::instructor(TEDDY), helpers::SECTION_NO)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn student_sees_own_scores_by_due_date() {
        let fx = scenario().await;
        let ted = CallerIdentity::instructor(TED);

        let earlier = fx
            .svc
            .create_assignment(
                &ted,
                &CreateAssignment {
                    title: "Warmup".into(),
                    due_date: "2025-09-05".into(),
                    sec_no: helpers::SECTION_NO,
                    course_id: None,
                    sec_id: None,
                },
            )
            .await
            .unwrap();

        let grades = fx.svc.list_grades(&ted, helpers::ASSIGNMENT_ID).await.unwrap();
        let sams = grades.iter().find(|g| g.student_email == SAM).unwrap();
        fx.svc
            .update_grades(
                &ted,
                &[GradeScoreUpdate {
                    grade_id: sams.grade_id,
                    score: Some(91),
                }],
            )
            .await
            .unwrap();

        let mine = fx
            .svc
            .list_student_assignments(&CallerIdentity::student(SAM), 2025, Semester::Fall)
            .await
            .unwrap();
        let ids: Vec<_> = mine.iter().map(|a| a.assignment_id).collect();
        assert_eq!(ids, vec![earlier.id, helpers::ASSIGNMENT_ID]);
        assert_eq!(mine[0].score, None);
        assert_eq!(mine[1].score, Some(91));
    }

    #[tokio::test]
    async fn instructors_cannot_use_student_listing() {
        let fx = scenario().await;
        let err = fx
            .svc
            .list_student_assignments(&CallerIdentity::instructor(TED), 2025, Semester::Fall)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
