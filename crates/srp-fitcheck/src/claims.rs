//! Claim-side operations: intake, cached compliance, comparison, preview.

use chrono::Utc;
use srp_core::compliance::{ComplianceResult, FitDiff};
use srp_core::entities::Claim;
use srp_core::killmail::Killmail;
use srp_db::repos::NewClaim;
use srp_esi::Resolver;

use crate::compliance::{FitComparison, compare, evaluate, needs_recompute};
use crate::diff::{DiffLine, diff_lines, diff_type_ids};
use crate::engine::FitCheckEngine;
use crate::error::FitCheckError;
use crate::extract::{ExtractedFit, extract};
use crate::preview::{PreviewGroup, group_items, item_type_ids};

/// A claim without a killmail snapshot is checked as an empty ship.
fn actual_fit(claim: &Claim) -> ExtractedFit {
    match &claim.killmail {
        Some(killmail) => extract(killmail),
        None => extract(&Killmail::default()),
    }
}

impl<R: Resolver> FitCheckEngine<R> {
    /// Store a new claim for a killmail.
    ///
    /// The hull comes from the victim; its display name is looked up through
    /// the name cache and left empty when unknown.
    pub async fn create_claim(
        &self,
        killmail: Option<&Killmail>,
        killmail_hash: Option<&str>,
    ) -> Result<Claim, FitCheckError> {
        let ship_name = match killmail.and_then(Killmail::ship_type_id) {
            Some(hull) => self.type_names(&[hull]).await?.remove(&hull),
            None => None,
        };
        let claim = self
            .db()
            .create_claim(&NewClaim {
                killmail_id: killmail.and_then(|km| km.killmail_id),
                killmail_hash,
                killmail,
                ship_name: ship_name.as_deref(),
            })
            .await?;
        tracing::info!(
            claim_id = %claim.id,
            ship_type_id = ?claim.ship_type_id,
            "fitcheck: claim created"
        );
        Ok(claim)
    }

    pub async fn get_claim(&self, claim_id: &str) -> Result<Claim, FitCheckError> {
        Ok(self.db().get_claim(claim_id).await?)
    }

    /// Cached compliance for a claim, recomputed only when stale.
    ///
    /// The cached result is stale when missing, when its verdict is empty,
    /// or when an active fit for the hull was updated after it was computed.
    pub async fn evaluate_compliance(
        &self,
        claim_id: &str,
    ) -> Result<ComplianceResult, FitCheckError> {
        let claim = self.db().get_claim(claim_id).await?;
        let newest = match claim.ship_type_id {
            Some(hull) => self.db().newest_active_fit_update(hull).await?,
            None => None,
        };
        if let Some(prior) = claim
            .compliance
            .as_ref()
            .filter(|prior| !needs_recompute(Some(prior), newest))
        {
            tracing::debug!(
                claim_id,
                status = prior.status(),
                "fitcheck: cached compliance is current"
            );
            return Ok(prior.clone());
        }
        self.recompute(&claim).await
    }

    /// Recompute and store compliance regardless of the cache.
    pub async fn rerun_compliance(
        &self,
        claim_id: &str,
    ) -> Result<ComplianceResult, FitCheckError> {
        let claim = self.db().get_claim(claim_id).await?;
        self.recompute(&claim).await
    }

    async fn recompute(&self, claim: &Claim) -> Result<ComplianceResult, FitCheckError> {
        let actual = actual_fit(claim);
        let candidates = match claim.ship_type_id {
            Some(hull) => self.db().active_fits_for_hull(hull).await?,
            None => Vec::new(),
        };
        let result = evaluate(
            &actual,
            claim.ship_type_id,
            &candidates,
            self.thresholds(),
            Utc::now(),
        );
        self.db().save_compliance(&claim.id, &result).await?;
        tracing::info!(
            claim_id = %claim.id,
            status = result.status(),
            candidates = candidates.len(),
            best_fit = ?result.best_fit_id,
            match_pct = ?result.match_pct,
            "fitcheck: compliance computed"
        );
        Ok(result)
    }

    /// Score a claim against one fit.
    ///
    /// `fit_id` defaults to the reviewer-selected fit. The cached best match
    /// is not touched.
    pub async fn compare_with_fit(
        &self,
        claim_id: &str,
        fit_id: Option<&str>,
    ) -> Result<FitComparison, FitCheckError> {
        let claim = self.db().get_claim(claim_id).await?;
        let fit_id = fit_id
            .map(str::to_string)
            .or(claim.selected_fit_id.clone())
            .ok_or_else(|| FitCheckError::NoFitSelected {
                claim_id: claim_id.to_string(),
            })?;
        let fit = self.db().get_fit(&fit_id).await?;
        let actual = actual_fit(&claim);
        Ok(compare(&actual, &fit, self.thresholds()))
    }

    /// Record the reviewer's chosen fit for a claim, or clear it with `None`.
    pub async fn select_fit(
        &self,
        claim_id: &str,
        fit_id: Option<&str>,
    ) -> Result<(), FitCheckError> {
        if let Some(fit_id) = fit_id {
            self.db().get_fit(fit_id).await?;
        }
        self.db().select_claim_fit(claim_id, fit_id).await?;
        tracing::info!(claim_id, fit_id = ?fit_id, "fitcheck: reviewer fit selected");
        Ok(())
    }

    /// Diff rows with module names from the type-name cache.
    pub async fn describe_diff(&self, diff: &FitDiff) -> Result<Vec<DiffLine>, FitCheckError> {
        let names = self.type_names(&diff_type_ids(diff)).await?;
        Ok(diff_lines(diff, &names))
    }

    /// Victim items grouped by slot with resolved names.
    pub async fn preview_fitting(
        &self,
        killmail: &Killmail,
    ) -> Result<Vec<PreviewGroup>, FitCheckError> {
        let names = self.type_names(&item_type_ids(killmail)).await?;
        Ok(group_items(killmail, &names))
    }
}
