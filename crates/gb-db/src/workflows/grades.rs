//! Assignment grades: lazy materialization on read, batch score updates.

use gb_core::audit_detail::ScoreChangedDetail;
use gb_core::enums::{AuditAction, EntityKind, Role};
use gb_core::errors::CoreError;
use gb_core::identity::CallerIdentity;
use gb_core::ownership::{OwnedTarget, require_role};
use gb_core::requests::GradeScoreUpdate;
use gb_core::responses::{BatchReport, GradeDto};
use libsql::Connection;

use crate::error::ServiceError;
use crate::ownership::authorize_target;
use crate::repos::{audit, grade};
use crate::service::GradebookService;
use crate::workflows::finish;

fn check_score(update: &GradeScoreUpdate) -> Result<(), CoreError> {
    match update.score {
        Some(score) if score < 0 => Err(CoreError::Validation(format!(
            "score {score} for grade {} must not be negative",
            update.grade_id
        ))),
        _ => Ok(()),
    }
}

async fn set_score_with_audit(
    conn: &Connection,
    actor: &str,
    update: &GradeScoreUpdate,
    previous: Option<i64>,
) -> Result<(), ServiceError> {
    grade::set_score(conn, update.grade_id, update.score).await?;
    audit::append_audit(
        conn,
        actor,
        EntityKind::Grade,
        update.grade_id,
        AuditAction::ScoreChanged,
        Some(&ScoreChangedDetail {
            from: previous,
            to: update.score,
        }),
    )
    .await?;
    Ok(())
}

impl GradebookService {
    /// Grades of every enrolled student for one assignment, creating any
    /// missing grade rows with a null score first.
    ///
    /// Repeated calls return the same grade ids.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown assignment, `Forbidden` for a non-owner.
    pub async fn list_grades(
        &self,
        caller: &CallerIdentity,
        assignment_id: i64,
    ) -> Result<Vec<GradeDto>, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;

        let section =
            authorize_target(&conn, caller, OwnedTarget::Assignment(assignment_id)).await?;
        let created =
            grade::ensure_grades_for_assignment(&conn, assignment_id, section.section_no).await?;
        if created > 0 {
            tracing::debug!(assignment_id, created, "materialized grade rows");
        }
        Ok(grade::grades_for_assignment(&conn, assignment_id).await?)
    }

    /// Apply score changes in order, committing each item on its own.
    ///
    /// Stops at the first item that is unknown, foreign, or invalid; items
    /// before it stay committed.
    ///
    /// # Errors
    ///
    /// The failing item's `NotFound`, `Forbidden`, or `Validation`.
    pub async fn update_grades(
        &self,
        caller: &CallerIdentity,
        updates: &[GradeScoreUpdate],
    ) -> Result<BatchReport, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let mut report = BatchReport::default();

        for update in updates {
            let conn = self.db().conn().await;

            let existing = grade::get_grade(&conn, update.grade_id)
                .await?
                .ok_or_else(|| CoreError::not_found(EntityKind::Grade, update.grade_id))?;
            authorize_target(&conn, caller, OwnedTarget::Grade(update.grade_id)).await?;
            check_score(update)?;

            let tx = conn.transaction().await?;
            let result = set_score_with_audit(&tx, &caller.email, update, existing.score).await;
            finish(tx, result).await?;

            report.persisted += 1;
            tracing::info!(
                grade_id = update.grade_id,
                from = ?existing.score,
                to = ?update.score,
                actor = %caller.email,
                "grade score updated"
            );
        }
        Ok(report)
    }
}
