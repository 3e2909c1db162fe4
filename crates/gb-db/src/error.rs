//! Database and service error types for gb-db.

use gb_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error returned by every `GradebookService` operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<libsql::Error> for ServiceError {
    fn from(e: libsql::Error) -> Self {
        Self::Database(DatabaseError::LibSql(e))
    }
}

impl ServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_core::enums::EntityKind;

    #[test]
    fn kind_passes_through_core_errors() {
        let err: ServiceError = CoreError::not_found(EntityKind::Grade, 3).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err: ServiceError = DatabaseError::NoResult.into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
