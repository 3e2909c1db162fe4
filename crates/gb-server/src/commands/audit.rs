use anyhow::Context;
use gb_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gbd audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = AuditFilter {
        entity: args.entity,
        entity_id: args.entity_id.clone(),
        action: args.action,
        actor_email: args.actor.clone(),
        limit: Some(args.limit),
    };
    let rows = ctx
        .service
        .query_audit(&filter)
        .await
        .context("audit query failed")?;
    output(&rows, flags.format)
}
