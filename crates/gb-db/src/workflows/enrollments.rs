//! Section enrollments: listing and batch letter-grade updates with a
//! registrar notice per persisted item.

use gb_core::audit_detail::LetterGradeChangedDetail;
use gb_core::enums::{AuditAction, EntityKind, Role};
use gb_core::errors::CoreError;
use gb_core::identity::CallerIdentity;
use gb_core::notice::RegistrarNotice;
use gb_core::ownership::{OwnedTarget, require_role};
use gb_core::requests::EnrollmentGradeUpdate;
use gb_core::responses::{BatchReport, EnrollmentDto};
use libsql::Connection;

use crate::error::{DatabaseError, ServiceError};
use crate::ownership::authorize_target;
use crate::repos::{audit, enrollment};
use crate::service::GradebookService;
use crate::workflows::finish;

/// Longest letter grade accepted ("A+", "B-", "INC", "CR/NC").
pub const MAX_LETTER_GRADE_LEN: usize = 5;

/// Trim; empty means "not yet assigned".
fn normalize_letter_grade(update: &EnrollmentGradeUpdate) -> Result<Option<String>, CoreError> {
    let Some(raw) = update.grade.as_deref() else {
        return Ok(None);
    };
    let grade = raw.trim();
    if grade.is_empty() {
        return Ok(None);
    }
    if grade.chars().count() > MAX_LETTER_GRADE_LEN {
        return Err(CoreError::Validation(format!(
            "grade '{grade}' for enrollment {} exceeds {MAX_LETTER_GRADE_LEN} characters",
            update.enrollment_id
        )));
    }
    Ok(Some(grade.to_string()))
}

/// Write the grade and audit row, then read back the projection the
/// registrar will receive.
async fn set_grade_with_audit(
    conn: &Connection,
    actor: &str,
    enrollment_id: i64,
    previous: Option<String>,
    grade: Option<&str>,
) -> Result<EnrollmentDto, ServiceError> {
    enrollment::set_letter_grade(conn, enrollment_id, grade).await?;
    audit::append_audit(
        conn,
        actor,
        EntityKind::Enrollment,
        enrollment_id,
        AuditAction::LetterGradeChanged,
        Some(&LetterGradeChangedDetail {
            from: previous,
            to: grade.map(str::to_string),
        }),
    )
    .await?;
    let projection = enrollment::enrollment_projection(conn, enrollment_id)
        .await?
        .ok_or(DatabaseError::NoResult)?;
    Ok(projection)
}

impl GradebookService {
    /// Enrollments of a section the caller teaches, by student name.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown section, `Forbidden` for a non-owner.
    pub async fn list_enrollments(
        &self,
        caller: &CallerIdentity,
        section_no: i64,
    ) -> Result<Vec<EnrollmentDto>, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;
        authorize_target(&conn, caller, OwnedTarget::Section(section_no)).await?;
        Ok(enrollment::enrollments_for_section(&conn, section_no).await?)
    }

    /// Apply letter-grade changes in order, committing each item on its own
    /// and queuing one registrar notice per committed item.
    ///
    /// Notice delivery is never awaited and never fails the batch.
    ///
    /// # Errors
    ///
    /// The first failing item's `NotFound`, `Forbidden`, or `Validation`.
    pub async fn update_enrollment_grades(
        &self,
        caller: &CallerIdentity,
        updates: &[EnrollmentGradeUpdate],
    ) -> Result<BatchReport, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let mut report = BatchReport::default();

        for update in updates {
            let projection = {
                let conn = self.db().conn().await;

                let existing = enrollment::get_enrollment(&conn, update.enrollment_id)
                    .await?
                    .ok_or_else(|| {
                        CoreError::not_found(EntityKind::Enrollment, update.enrollment_id)
                    })?;
                authorize_target(&conn, caller, OwnedTarget::Enrollment(update.enrollment_id))
                    .await?;
                let grade = normalize_letter_grade(update)?;

                let tx = conn.transaction().await?;
                let result = set_grade_with_audit(
                    &tx,
                    &caller.email,
                    update.enrollment_id,
                    existing.grade,
                    grade.as_deref(),
                )
                .await;
                finish(tx, result).await?
            };
            report.persisted += 1;
            tracing::info!(
                enrollment_id = update.enrollment_id,
                grade = ?projection.grade,
                actor = %caller.email,
                "enrollment grade updated"
            );

            if self
                .registrar()
                .dispatch(RegistrarNotice::update_enrollment(projection))
                .is_queued()
            {
                report.notices_queued += 1;
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{self, TED, TEDDY, scenario};
    use gb_core::errors::ErrorKind;
    use gb_core::notice::NoticeAction;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn set(enrollment_id: i64, grade: &str) -> EnrollmentGradeUpdate {
        EnrollmentGradeUpdate {
            enrollment_id,
            grade: Some(grade.into()),
        }
    }

    #[tokio::test]
    async fn grading_whole_section_notifies_once_per_enrollment() {
        let mut fx = scenario().await;
        let ted = CallerIdentity::instructor(TED);

        let before = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();
        let updates: Vec<_> = before.iter().map(|e| set(e.enrollment_id, "A")).collect();
        let report = fx.svc.update_enrollment_grades(&ted, &updates).await.unwrap();

        assert_eq!(report.persisted, before.len());
        assert_eq!(report.notices_queued, before.len());

        let after = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();
        assert!(after.iter().all(|e| e.grade.as_deref() == Some("A")));

        let mut notified = Vec::new();
        while let Ok(notice) = fx.notices.try_recv() {
            assert_eq!(notice.action, NoticeAction::UpdateEnrollment);
            assert_eq!(notice.payload.grade.as_deref(), Some("A"));
            notified.push(notice.payload.enrollment_id);
        }
        let expected: Vec<_> = before.iter().map(|e| e.enrollment_id).collect();
        assert_eq!(notified, expected);
    }

    #[tokio::test]
    async fn listing_is_ordered_by_student_name() {
        let fx = scenario().await;
        let rows = fx
            .svc
            .list_enrollments(&CallerIdentity::instructor(TED), helpers::SECTION_NO)
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|e| e.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn foreign_instructor_is_denied_and_nothing_is_sent() {
        let mut fx = scenario().await;
        let ted = CallerIdentity::instructor(TED);
        let rows = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();

        let err = fx
            .svc
            .update_enrollment_grades(
                &CallerIdentity::instructor(TEDDY),
                &[set(rows[0].enrollment_id, "F")],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(fx.notices.try_recv().is_err());

        let after = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();
        assert_eq!(after, rows);
    }

    #[tokio::test]
    async fn batch_stops_at_first_unknown_enrollment() {
        let mut fx = scenario().await;
        let ted = CallerIdentity::instructor(TED);
        let rows = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();

        let err = fx
            .svc
            .update_enrollment_grades(
                &ted,
                &[
                    set(rows[0].enrollment_id, "B+"),
                    set(9_999, "C"),
                    set(rows[1].enrollment_id, "C"),
                ],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let after = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();
        assert_eq!(after[0].grade.as_deref(), Some("B+"));
        assert_eq!(after[1].grade, rows[1].grade);

        assert_eq!(fx.notices.try_recv().unwrap().payload.enrollment_id, rows[0].enrollment_id);
        assert!(fx.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn full_queue_does_not_fail_the_batch() {
        let fx = helpers::scenario_with_capacity(1).await;
        let ted = CallerIdentity::instructor(TED);
        let rows = fx.svc.list_enrollments(&ted, helpers::SECTION_NO).await.unwrap();
        let updates: Vec<_> = rows.iter().map(|e| set(e.enrollment_id, "P")).collect();

        let report = fx.svc.update_enrollment_grades(&ted, &updates).await.unwrap();
        assert_eq!(report.persisted, rows.len());
        assert_eq!(report.notices_queued, 1);
    }

    #[rstest]
    #[case(Some("  A- "), Ok(Some("A-")))]
    #[case(Some(""), Ok(None))]
    #[case(None, Ok(None))]
    #[case(Some("EXCELLENT"), Err(()))]
    fn letter_grade_normalization(
        #[case] input: Option<&str>,
        #[case] expected: Result<Option<&str>, ()>,
    ) {
        let update = EnrollmentGradeUpdate {
            enrollment_id: 1,
            grade: input.map(str::to_string),
        };
        let got = normalize_letter_grade(&update).map_err(|_| ());
        assert_eq!(got, expected.map(|g| g.map(str::to_string)));
    }
}
