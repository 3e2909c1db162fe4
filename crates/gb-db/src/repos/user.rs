//! User repository.

use gb_core::entities::User;
use gb_core::enums::Role;
use libsql::Connection;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;

const SELECT_COLS: &str = "id, name, email, role";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
    })
}

pub async fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
        .await?;
    rows.next().await?.as_ref().map(row_to_user).transpose()
}

pub async fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"), [email])
        .await?;
    rows.next().await?.as_ref().map(row_to_user).transpose()
}

/// Insert or refresh the user keyed by `email`.
pub async fn upsert_user(
    conn: &Connection,
    name: &str,
    email: &str,
    role: Role,
) -> Result<User, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "INSERT INTO users (name, email, role) VALUES (?1, ?2, ?3)
                 ON CONFLICT (email) DO UPDATE SET name = excluded.name, role = excluded.role
                 RETURNING {SELECT_COLS}"
            ),
            libsql::params![name, email, role.as_str()],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_user(&row)
}
