use gb_config::GradebookConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: GradebookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Token(args) => commands::token::handle(&args, &config, flags),
        Commands::Serve => {
            let ctx = AppContext::init(config).await?;
            commands::serve::handle(ctx).await
        }
        Commands::Import(args) => {
            let ctx = AppContext::init(config).await?;
            let result = commands::import::handle(&args, &ctx, flags).await;
            ctx.shutdown().await;
            result
        }
        Commands::Audit(args) => {
            let ctx = AppContext::init(config).await?;
            let result = commands::audit::handle(&args, &ctx, flags).await;
            ctx.shutdown().await;
            result
        }
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
