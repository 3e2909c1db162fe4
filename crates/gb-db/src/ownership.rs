//! Resolves any owned record up to the section that governs it.

use gb_core::entities::Section;
use gb_core::errors::CoreError;
use gb_core::identity::CallerIdentity;
use gb_core::ownership::{OwnedTarget, authorize};
use libsql::Connection;

use crate::error::ServiceError;
use crate::repos::section::{SELECT_COLS, row_to_section};

/// The section that owns `target`.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for the target's own kind and id when the
/// record (or its chain up to a section) does not exist.
pub async fn owning_section(conn: &Connection, target: OwnedTarget) -> Result<Section, ServiceError> {
    let sql = match target {
        OwnedTarget::Section(_) => {
            format!("SELECT {SELECT_COLS} FROM sections s WHERE s.section_no = ?1")
        }
        OwnedTarget::Assignment(_) => format!(
            "SELECT {SELECT_COLS} FROM assignments a
             JOIN sections s ON s.section_no = a.section_no
             WHERE a.id = ?1"
        ),
        OwnedTarget::Enrollment(_) => format!(
            "SELECT {SELECT_COLS} FROM enrollments e
             JOIN sections s ON s.section_no = e.section_no
             WHERE e.id = ?1"
        ),
        OwnedTarget::Grade(_) => format!(
            "SELECT {SELECT_COLS} FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             JOIN sections s ON s.section_no = e.section_no
             WHERE g.id = ?1"
        ),
    };
    let mut rows = conn.query(&sql, [target.id()]).await?;
    let row = rows.next().await?.ok_or_else(|| target.not_found())?;
    Ok(row_to_section(&row)?)
}

/// Resolve `target` and require `caller` to be its section's instructor.
///
/// Existence is checked before ownership, so an unknown id is always
/// `NotFound` regardless of who asks.
///
/// # Errors
///
/// `CoreError::NotFound` or `CoreError::Forbidden`.
pub async fn authorize_target(
    conn: &Connection,
    caller: &CallerIdentity,
    target: OwnedTarget,
) -> Result<Section, ServiceError> {
    let section = owning_section(conn, target).await?;
    authorize(caller, &section).into_result().inspect_err(|e: &CoreError| {
        tracing::warn!(caller = %caller.email, %target, reason = %e, "ownership denied");
    })?;
    Ok(section)
}
