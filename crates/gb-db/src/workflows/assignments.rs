//! Assignment lifecycle: create, update, delete, each bound to the owning
//! term's date range.

use gb_core::audit_detail::AssignmentDetail;
use gb_core::dates::{format_date, validate_due_date};
use gb_core::entities::{Assignment, Section};
use gb_core::enums::{AuditAction, EntityKind, Role};
use gb_core::errors::CoreError;
use gb_core::identity::CallerIdentity;
use gb_core::ownership::{OwnedTarget, require_role};
use gb_core::requests::{CreateAssignment, UpdateAssignment};
use gb_core::responses::AssignmentDto;
use libsql::Connection;

use crate::error::{DatabaseError, ServiceError};
use crate::ownership::authorize_target;
use crate::repos::{assignment, audit, grade, term};
use crate::service::GradebookService;
use crate::workflows::finish;

/// Client-supplied identifiers must describe `section` when present.
fn check_section_ids(
    section: &Section,
    sec_no: Option<i64>,
    course_id: Option<&str>,
    sec_id: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(sec_no) = sec_no
        && sec_no != section.section_no
    {
        return Err(CoreError::Validation(format!(
            "section number {sec_no} does not match assignment section {}",
            section.section_no
        )));
    }
    if let Some(course_id) = course_id
        && course_id != section.course_id
    {
        return Err(CoreError::Validation(format!(
            "course id '{course_id}' does not match section course '{}'",
            section.course_id
        )));
    }
    if let Some(sec_id) = sec_id
        && sec_id != section.sec_id
    {
        return Err(CoreError::Validation(format!(
            "section id {sec_id} does not match section {}",
            section.sec_id
        )));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<&str, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("assignment title must not be empty".into()));
    }
    Ok(title)
}

/// Parse the due date and check it against the section's term.
async fn checked_due_date(
    conn: &Connection,
    section: &Section,
    due_date: &str,
) -> Result<chrono::NaiveDate, ServiceError> {
    let term = term::get_term(conn, section.term_id).await?.ok_or_else(|| {
        DatabaseError::InvalidState(format!(
            "section {} references missing term {}",
            section.section_no, section.term_id
        ))
    })?;
    Ok(validate_due_date(due_date, &term)?)
}

fn detail(assignment: &Assignment, grades_removed: Option<u64>) -> AssignmentDetail {
    AssignmentDetail {
        section_no: assignment.section_no,
        title: assignment.title.clone(),
        due_date: format_date(assignment.due_date),
        grades_removed,
    }
}

async fn insert_with_audit(
    conn: &Connection,
    actor: &str,
    section_no: i64,
    title: &str,
    due: chrono::NaiveDate,
) -> Result<Assignment, ServiceError> {
    let created = assignment::insert_assignment(conn, section_no, title, due).await?;
    audit::append_audit(
        conn,
        actor,
        EntityKind::Assignment,
        created.id,
        AuditAction::Created,
        Some(&detail(&created, None)),
    )
    .await?;
    Ok(created)
}

async fn update_with_audit(
    conn: &Connection,
    actor: &str,
    id: i64,
    title: &str,
    due: chrono::NaiveDate,
) -> Result<Assignment, ServiceError> {
    let updated = assignment::update_assignment(conn, id, title, due).await?;
    audit::append_audit(
        conn,
        actor,
        EntityKind::Assignment,
        id,
        AuditAction::Updated,
        Some(&detail(&updated, None)),
    )
    .await?;
    Ok(updated)
}

async fn delete_with_audit(
    conn: &Connection,
    actor: &str,
    existing: &Assignment,
) -> Result<u64, ServiceError> {
    let grades_removed = grade::delete_for_assignment(conn, existing.id).await?;
    if assignment::delete_assignment(conn, existing.id).await? == 0 {
        return Err(CoreError::not_found(EntityKind::Assignment, existing.id).into());
    }
    audit::append_audit(
        conn,
        actor,
        EntityKind::Assignment,
        existing.id,
        AuditAction::Deleted,
        Some(&detail(existing, Some(grades_removed))),
    )
    .await?;
    Ok(grades_removed)
}

impl GradebookService {
    /// Create an assignment in a section the caller teaches.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown section, `Forbidden` for a non-owner,
    /// `Validation` for a blank title, mismatched ids, or a due date that is
    /// malformed or outside the term.
    pub async fn create_assignment(
        &self,
        caller: &CallerIdentity,
        req: &CreateAssignment,
    ) -> Result<AssignmentDto, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;

        let section = authorize_target(&conn, caller, OwnedTarget::Section(req.sec_no)).await?;
        check_section_ids(&section, None, req.course_id.as_deref(), req.sec_id)?;
        let title = check_title(&req.title)?;
        let due = checked_due_date(&conn, &section, &req.due_date).await?;

        let tx = conn.transaction().await?;
        let result = insert_with_audit(&tx, &caller.email, section.section_no, title, due).await;
        let created = finish(tx, result).await?;

        tracing::info!(
            assignment_id = created.id,
            section_no = section.section_no,
            actor = %caller.email,
            "assignment created"
        );
        Ok(AssignmentDto::project(&created, &section))
    }

    /// Change the title and due date of an assignment the caller owns.
    ///
    /// # Errors
    ///
    /// As [`Self::create_assignment`]; a supplied `secNo`/`courseId`/`secId`
    /// that does not describe the assignment's current section is
    /// `Validation`.
    pub async fn update_assignment(
        &self,
        caller: &CallerIdentity,
        req: &UpdateAssignment,
    ) -> Result<AssignmentDto, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;

        let section = authorize_target(&conn, caller, OwnedTarget::Assignment(req.id)).await?;
        check_section_ids(&section, req.sec_no, req.course_id.as_deref(), req.sec_id)?;
        let title = check_title(&req.title)?;
        let due = checked_due_date(&conn, &section, &req.due_date).await?;

        let tx = conn.transaction().await?;
        let result = update_with_audit(&tx, &caller.email, req.id, title, due).await;
        let updated = finish(tx, result).await?;

        tracing::info!(assignment_id = updated.id, actor = %caller.email, "assignment updated");
        Ok(AssignmentDto::project(&updated, &section))
    }

    /// Delete an assignment and, in the same transaction, its grades.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown assignment, `Forbidden` for a non-owner.
    pub async fn delete_assignment(&self, caller: &CallerIdentity, id: i64) -> Result<(), ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;

        authorize_target(&conn, caller, OwnedTarget::Assignment(id)).await?;
        let existing = assignment::get_assignment(&conn, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Assignment, id))?;

        let tx = conn.transaction().await?;
        let result = delete_with_audit(&tx, &caller.email, &existing).await;
        let grades_removed = finish(tx, result).await?;

        tracing::info!(assignment_id = id, grades_removed, actor = %caller.email, "assignment deleted");
        Ok(())
    }

    /// One assignment of a section the caller teaches.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown assignment, `Forbidden` for a non-owner.
    pub async fn assignment(&self, caller: &CallerIdentity, id: i64) -> Result<AssignmentDto, ServiceError> {
        require_role(caller, Role::Instructor)?;
        let conn = self.db().conn().await;
        let section = authorize_target(&conn, caller, OwnedTarget::Assignment(id)).await?;
        let found = assignment::get_assignment(&conn, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Assignment, id))?;
        Ok(AssignmentDto::project(&found, &section))
    }
}
