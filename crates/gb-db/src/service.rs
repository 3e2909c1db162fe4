//! Service layer hosting every gated gradebook operation.
//!
//! `GradebookService` wraps `GradebookDb` (the entity store) and a
//! `RegistrarHandle` (the notice queue). Operations are implemented as
//! `impl GradebookService` blocks under `crate::workflows`.
//!
//! Every mutation follows this protocol:
//! 1. Require the caller's role
//! 2. Resolve the target up to its section and run the ownership guard
//! 3. Validate input
//! 4. Begin transaction, write, append audit row, commit
//! 5. For enrollment grades, queue a registrar notice (never awaited)

use gb_registrar::RegistrarHandle;

use crate::GradebookDb;
use crate::error::{DatabaseError, ServiceError};
use crate::repos::audit::{self, AuditFilter};
use gb_core::entities::AuditEntry;

pub struct GradebookService {
    db: GradebookDb,
    registrar: RegistrarHandle,
}

impl GradebookService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, registrar: RegistrarHandle) -> Result<Self, DatabaseError> {
        let db = GradebookDb::open_local(db_path).await?;
        Ok(Self::from_db(db, registrar))
    }

    #[must_use]
    pub const fn from_db(db: GradebookDb, registrar: RegistrarHandle) -> Self {
        Self { db, registrar }
    }

    #[must_use]
    pub const fn db(&self) -> &GradebookDb {
        &self.db
    }

    #[must_use]
    pub const fn registrar(&self) -> &RegistrarHandle {
        &self.registrar
    }

    /// Read audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, ServiceError> {
        let conn = self.db.conn().await;
        Ok(audit::query_audit(&conn, filter).await?)
    }
}
