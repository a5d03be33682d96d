use anyhow::Context;
use serde::Serialize;
use srp_core::compliance::ComplianceResult;
use srp_core::entities::Claim;
use srp_core::enums::EntityKind;
use srp_core::killmail::Killmail;
use srp_esi::parse_killmail_link;
use srp_fitcheck::{DiffLine, FitComparison, KillmailFlags, PreviewGroup, killmail_flags};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClaimCommands;
use crate::commands::shared::input::read_source;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ClaimDetailResponse {
    claim: Claim,
    victim_corporation: Option<String>,
    victim_alliance: Option<String>,
    flags: Option<KillmailFlags>,
}

#[derive(Debug, Serialize)]
struct ComplianceResponse {
    claim_id: String,
    #[serde(flatten)]
    result: ComplianceResult,
    diff_lines: Vec<DiffLine>,
}

#[derive(Debug, Serialize)]
struct ComparisonResponse {
    claim_id: String,
    #[serde(flatten)]
    comparison: FitComparison,
    diff_lines: Vec<DiffLine>,
}

#[derive(Debug, Serialize)]
struct PreviewResponse {
    claim_id: String,
    ship_name: Option<String>,
    groups: Vec<PreviewGroup>,
}

#[derive(Debug, Serialize)]
struct SelectionResponse {
    claim_id: String,
    selected_fit_id: Option<String>,
}

/// Handle `srp claim`.
pub async fn handle(
    action: &ClaimCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine = &ctx.engine;
    match action {
        ClaimCommands::Add { link, file } => {
            let claim = match (link, file) {
                (Some(link), _) => {
                    let (killmail_id, hash) = parse_killmail_link(link)
                        .with_context(|| format!("no /killmails/<id>/<hash> in link '{link}'"))?;
                    let killmail = engine.resolver().fetch_killmail(killmail_id, &hash).await?;
                    engine.create_claim(Some(&killmail), Some(&hash)).await?
                }
                (None, Some(file)) => {
                    let killmail = parse_killmail(&read_source(file)?)?;
                    engine.create_claim(Some(&killmail), None).await?
                }
                (None, None) => anyhow::bail!("either --link or --file is required"),
            };
            output(&claim, flags.format)
        }
        ClaimCommands::Get { id } => {
            let claim = engine.get_claim(id).await?;
            let (victim_corporation, victim_alliance) = match &claim.killmail {
                Some(killmail) => victim_names(ctx, killmail).await?,
                None => (None, None),
            };
            let flags_summary = claim
                .killmail
                .as_ref()
                .map(|killmail| killmail_flags(killmail, &ctx.standings));
            output(
                &ClaimDetailResponse {
                    claim,
                    victim_corporation,
                    victim_alliance,
                    flags: flags_summary,
                },
                flags.format,
            )
        }
        ClaimCommands::Check { id } => {
            let result = engine.evaluate_compliance(id).await?;
            output(&compliance_response(ctx, id, result).await?, flags.format)
        }
        ClaimCommands::Rerun { id } => {
            let result = engine.rerun_compliance(id).await?;
            output(&compliance_response(ctx, id, result).await?, flags.format)
        }
        ClaimCommands::Compare { id, fit } => {
            let comparison = engine.compare_with_fit(id, fit.as_deref()).await?;
            let diff_lines = engine.describe_diff(&comparison.diff).await?;
            output(
                &ComparisonResponse {
                    claim_id: id.clone(),
                    comparison,
                    diff_lines,
                },
                flags.format,
            )
        }
        ClaimCommands::Select { id, fit, clear } => {
            let fit_id = if *clear { None } else { fit.as_deref() };
            engine.select_fit(id, fit_id).await?;
            output(
                &SelectionResponse {
                    claim_id: id.clone(),
                    selected_fit_id: fit_id.map(str::to_string),
                },
                flags.format,
            )
        }
        ClaimCommands::Preview { id } => {
            let claim = engine.get_claim(id).await?;
            let killmail = claim
                .killmail
                .as_ref()
                .with_context(|| format!("claim '{id}' has no killmail"))?;
            let groups = engine.preview_fitting(killmail).await?;
            output(
                &PreviewResponse {
                    claim_id: claim.id.clone(),
                    ship_name: claim.ship_name.clone(),
                    groups,
                },
                flags.format,
            )
        }
    }
}

async fn compliance_response(
    ctx: &AppContext,
    claim_id: &str,
    result: ComplianceResult,
) -> anyhow::Result<ComplianceResponse> {
    let diff_lines = match &result.diff {
        Some(diff) => ctx.engine.describe_diff(diff).await?,
        None => Vec::new(),
    };
    Ok(ComplianceResponse {
        claim_id: claim_id.to_string(),
        result,
        diff_lines,
    })
}

fn parse_killmail(text: &str) -> anyhow::Result<Killmail> {
    serde_json::from_str(text).context("killmail JSON is not in ESI shape")
}

async fn victim_names(
    ctx: &AppContext,
    killmail: &Killmail,
) -> anyhow::Result<(Option<String>, Option<String>)> {
    let victim = &killmail.victim;
    let mut corporation = None;
    if let Some(id) = victim.corporation_id {
        corporation = ctx
            .engine
            .entity_names(EntityKind::Corporation, &[id])
            .await?
            .remove(&id);
    }
    let mut alliance = None;
    if let Some(id) = victim.alliance_id {
        alliance = ctx
            .engine
            .entity_names(EntityKind::Alliance, &[id])
            .await?
            .remove(&id);
    }
    Ok((corporation, alliance))
}
