use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Fit { action } => commands::fit::handle(&action, ctx, flags).await,
        Commands::Claim { action } => commands::claim::handle(&action, ctx, flags).await,
        Commands::Resolve { action } => commands::resolve::handle(&action, ctx, flags).await,
    }
}
