//! Gated operations, grouped by concern. Each module adds methods to
//! `GradebookService`.

pub mod assignments;
pub mod enrollments;
pub mod grades;
pub mod listings;

use libsql::Transaction;

use crate::error::ServiceError;

/// Commit `tx` if `result` is `Ok`, roll it back otherwise.
pub(crate) async fn finish<T>(
    tx: Transaction,
    result: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}
