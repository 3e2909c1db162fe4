//! # gb-db
//!
//! libSQL entity store for the gradebook, and the [`service::GradebookService`]
//! that runs every gated read and mutation against it.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod ownership;
pub mod repos;
pub mod roster;
pub mod service;
pub mod workflows;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

pub use error::ServiceError;
pub use service::GradebookService;

/// Handle to the gradebook database.
///
/// Holds a single connection behind an async mutex. Each service operation
/// takes the lock for the span of one transaction, so a transaction never
/// interleaves with statements from another request.
pub struct GradebookDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Mutex<libsql::Connection>,
}

impl GradebookDb {
    /// Open a local database at `path` (`:memory:` for tests).
    ///
    /// Creates the parent directory if needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Other(anyhow::anyhow!("create {}: {e}", parent.display()))
            })?;
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let gradebook_db = Self {
            db,
            conn: Mutex::new(conn),
        };
        gradebook_db.run_migrations().await?;
        tracing::debug!(path, "gradebook database opened");
        Ok(gradebook_db)
    }

    /// Lock the connection for exclusive use.
    pub async fn conn(&self) -> MutexGuard<'_, libsql::Connection> {
        self.conn.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = GradebookDb::open_local(":memory:").await.unwrap();
        let conn = db.conn().await;

        for table in [
            "terms",
            "courses",
            "users",
            "sections",
            "assignments",
            "enrollments",
            "grades",
            "audit_trail",
        ] {
            let mut rows = conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "table '{table}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = GradebookDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gradebook.db");
        let db = GradebookDb::open_local(path.to_str().unwrap()).await.unwrap();
        drop(db);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn grade_pair_is_unique() {
        let db = GradebookDb::open_local(":memory:").await.unwrap();
        let conn = db.conn().await;
        conn.execute_batch(
            "INSERT INTO terms (year, semester, start_date, end_date) VALUES (2025, 'Fall', '2025-09-01', '2025-12-15');
             INSERT INTO courses VALUES ('cst438', 'Software Engineering', 4);
             INSERT INTO users (name, email, role) VALUES ('sam', 'sam@csumb.edu', 'student');
             INSERT INTO sections (section_no, course_id, term_id, sec_id, instructor_email) VALUES (1, 'cst438', 1, 1, 'ted@csumb.edu');
             INSERT INTO assignments (section_no, title, due_date) VALUES (1, 'hw', '2025-10-01');
             INSERT INTO enrollments (section_no, student_id) VALUES (1, 1);
             INSERT INTO grades (enrollment_id, assignment_id) VALUES (1, 1);",
        )
        .await
        .unwrap();

        let dup = conn
            .execute(
                "INSERT INTO grades (enrollment_id, assignment_id) VALUES (1, 1)",
                (),
            )
            .await;
        assert!(dup.is_err(), "duplicate grade pair should be rejected");
    }
}
