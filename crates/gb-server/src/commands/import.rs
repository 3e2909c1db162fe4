use anyhow::Context;
use gb_db::roster::Roster;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gbd import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let roster: Roster = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid roster file", args.file.display()))?;

    let summary = ctx
        .service
        .import_roster(&roster)
        .await
        .context("roster import failed")?;
    output(&summary, flags.format)
}
