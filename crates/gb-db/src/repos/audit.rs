//! Audit trail repository.
//!
//! Append-only rows recording every successful mutation.

use chrono::Utc;
use gb_core::entities::AuditEntry;
use gb_core::enums::{AuditAction, EntityKind};
use libsql::Connection;
use serde::Serialize;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};

/// Filter criteria for audit queries.
#[derive(Debug, Default, Clone)]
pub struct AuditFilter {
    pub entity: Option<EntityKind>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor_email: Option<String>,
    pub limit: Option<u32>,
}

/// Append one audit row. Call inside the mutation's transaction.
pub async fn append_audit<D: Serialize>(
    conn: &Connection,
    actor_email: &str,
    entity: EntityKind,
    entity_id: i64,
    action: AuditAction,
    detail: Option<&D>,
) -> Result<(), DatabaseError> {
    let detail = detail
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| DatabaseError::Other(e.into()))?;
    conn.execute(
        "INSERT INTO audit_trail (actor_email, entity_type, entity_id, action, detail, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            actor_email,
            entity.as_str(),
            entity_id.to_string(),
            action.as_str(),
            detail,
            Utc::now().to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

/// Query audit entries, newest first.
pub async fn query_audit(
    conn: &Connection,
    filter: &AuditFilter,
) -> Result<Vec<AuditEntry>, DatabaseError> {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(entity) = filter.entity {
        params.push(libsql::Value::Text(entity.as_str().to_string()));
        conditions.push(format!("entity_type = ?{}", params.len()));
    }
    if let Some(ref eid) = filter.entity_id {
        params.push(libsql::Value::Text(eid.clone()));
        conditions.push(format!("entity_id = ?{}", params.len()));
    }
    if let Some(action) = filter.action {
        params.push(libsql::Value::Text(action.as_str().to_string()));
        conditions.push(format!("action = ?{}", params.len()));
    }
    if let Some(ref actor) = filter.actor_email {
        params.push(libsql::Value::Text(actor.clone()));
        conditions.push(format!("actor_email = ?{}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let limit = filter.limit.unwrap_or(100);
    let sql = format!(
        "SELECT id, actor_email, entity_type, entity_id, action, detail, created_at
         FROM audit_trail {where_clause}
         ORDER BY id DESC LIMIT {limit}"
    );

    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(AuditEntry {
            id: row.get::<i64>(0)?,
            actor_email: row.get::<String>(1)?,
            entity: parse_enum(&row.get::<String>(2)?)?,
            entity_id: row.get::<String>(3)?,
            action: parse_enum(&row.get::<String>(4)?)?,
            detail: parse_optional_json(get_opt_string(&row, 5)?.as_deref())?,
            created_at: parse_datetime(&row.get::<String>(6)?)?,
        });
    }
    Ok(entries)
}
