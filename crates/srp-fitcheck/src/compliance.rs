//! Verdicts: best-fit selection, classification and the recompute policy.

use chrono::{DateTime, Utc};
use serde::Serialize;
use srp_config::FitCheckConfig;
use srp_core::compliance::{ComplianceResult, FitDiff};
use srp_core::entities::ReferenceFit;
use srp_core::enums::Verdict;
use srp_core::fitting::{Fitting, Quantity, TypeId};

use crate::diff::diff;
use crate::extract::ExtractedFit;
use crate::score::{FitScore, score};

/// Match fractions separating `FIT_OK`, `FIT_CLOSE` and `FIT_MISMATCH`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub ok: f64,
    pub close: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&FitCheckConfig::default())
    }
}

impl From<&FitCheckConfig> for Thresholds {
    fn from(config: &FitCheckConfig) -> Self {
        Self {
            ok: config.ok_threshold,
            close: config.close_threshold,
        }
    }
}

/// `FIT_OK` needs nothing missing as well as a high match.
#[must_use]
pub fn classify(match_pct: f64, missing: Quantity, thresholds: Thresholds) -> Verdict {
    if missing == 0 && match_pct >= thresholds.ok {
        Verdict::FitOk
    } else if match_pct >= thresholds.close {
        Verdict::FitClose
    } else {
        Verdict::FitMismatch
    }
}

/// First candidate with the strictly highest score.
///
/// Candidates must already be in tie-break order (title, then ID).
#[must_use]
pub fn best_candidate<'a>(
    actual: &Fitting,
    candidates: &'a [ReferenceFit],
) -> Option<(&'a ReferenceFit, FitScore)> {
    let mut best: Option<(&ReferenceFit, FitScore)> = None;
    for fit in candidates {
        let scored = score(actual, &fit.expected_fitting());
        if best.is_none_or(|(_, top)| scored.score > top.score) {
            best = Some((fit, scored));
        }
    }
    best
}

/// Compliance of an extracted fit against the active fits for its hull.
///
/// `hull` is `None` when the killmail carries no ship type; the verdict is
/// then empty and nothing is compared.
#[must_use]
pub fn evaluate(
    actual: &ExtractedFit,
    hull: Option<TypeId>,
    candidates: &[ReferenceFit],
    thresholds: Thresholds,
    computed_at: DateTime<Utc>,
) -> ComplianceResult {
    let mut result = ComplianceResult {
        verdict: None,
        best_fit_id: None,
        best_fit_name: None,
        match_pct: None,
        no_rigs: actual.no_rigs,
        diff: None,
        computed_at,
    };
    if hull.is_none() {
        return result;
    }
    let Some((fit, scored)) = best_candidate(&actual.fitting, candidates) else {
        result.verdict = Some(Verdict::NoDoctrineFit);
        return result;
    };

    result.verdict = Some(classify(scored.match_pct, scored.missing, thresholds));
    result.best_fit_id = Some(fit.id.clone());
    result.best_fit_name = Some(fit.name.clone());
    result.match_pct = Some(scored.match_pct);
    result.diff = Some(diff(&fit.expected_fitting(), &actual.fitting));
    result
}

/// Whether a cached result is stale.
///
/// Stale when there is none, when its verdict is empty, or when an active
/// fit for the hull changed strictly after it was computed.
#[must_use]
pub fn needs_recompute(
    prior: Option<&ComplianceResult>,
    newest_fit_update: Option<DateTime<Utc>>,
) -> bool {
    let Some(prior) = prior else {
        return true;
    };
    if prior.verdict.is_none() {
        return true;
    }
    newest_fit_update.is_some_and(|updated| updated > prior.computed_at)
}

/// A claim scored against one chosen fit, regardless of the cached best match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitComparison {
    pub fit_id: String,
    pub fit_name: String,
    pub verdict: Verdict,
    pub score: FitScore,
    pub diff: FitDiff,
}

#[must_use]
pub fn compare(actual: &ExtractedFit, fit: &ReferenceFit, thresholds: Thresholds) -> FitComparison {
    let expected = fit.expected_fitting();
    let scored = score(&actual.fitting, &expected);
    FitComparison {
        fit_id: fit.id.clone(),
        fit_name: fit.name.clone(),
        verdict: classify(scored.match_pct, scored.missing, thresholds),
        score: scored,
        diff: diff(&expected, &actual.fitting),
    }
}
