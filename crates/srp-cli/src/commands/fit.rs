use serde::Serialize;
use srp_core::entities::ReferenceFit;
use srp_db::repos::FitFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FitCommands;
use crate::commands::shared::input::read_source;
use crate::context::AppContext;
use crate::output::output;

/// One line per fit for listings; items are only counted.
#[derive(Debug, Serialize)]
struct FitSummary {
    id: String,
    ship_type_id: i64,
    ship_name: String,
    name: String,
    active: bool,
    items: usize,
    updated_by: Option<String>,
    updated_at: String,
}

impl From<ReferenceFit> for FitSummary {
    fn from(fit: ReferenceFit) -> Self {
        Self {
            items: fit.items.len(),
            id: fit.id,
            ship_type_id: fit.ship_type_id,
            ship_name: fit.ship_name,
            name: fit.name,
            active: fit.active,
            updated_by: fit.updated_by,
            updated_at: fit.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FitListResponse {
    fits: Vec<FitSummary>,
}

#[derive(Debug, Serialize)]
struct FitDeletedResponse {
    deleted: String,
}

/// Handle `srp fit`.
pub async fn handle(
    action: &FitCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine = &ctx.engine;
    match action {
        FitCommands::Import {
            file,
            overwrite,
            actor,
        } => {
            let text = read_source(file)?;
            let report = engine
                .import_fit(&text, actor.as_deref(), overwrite.as_deref())
                .await?;
            if !report.unresolved_names.is_empty() && !flags.quiet {
                eprintln!(
                    "warning: {} module name(s) could not be resolved and were left out: {}",
                    report.unresolved_names.len(),
                    report.unresolved_names.join(", ")
                );
            }
            output(&report, flags.format)
        }
        FitCommands::List { ship, all } => {
            let fits = engine
                .list_fits(FitFilter {
                    ship_type_id: *ship,
                    include_inactive: *all,
                })
                .await?;
            let fits = fits.into_iter().map(FitSummary::from).collect();
            output(&FitListResponse { fits }, flags.format)
        }
        FitCommands::Get { id } => output(&engine.get_fit(id).await?, flags.format),
        FitCommands::Activate { id, actor } => {
            let fit = engine.set_fit_active(id, true, actor.as_deref()).await?;
            output(&FitSummary::from(fit), flags.format)
        }
        FitCommands::Deactivate { id, actor } => {
            let fit = engine.set_fit_active(id, false, actor.as_deref()).await?;
            output(&FitSummary::from(fit), flags.format)
        }
        FitCommands::Delete { id } => {
            engine.delete_fit(id).await?;
            output(&FitDeletedResponse { deleted: id.clone() }, flags.format)
        }
    }
}
