//! Cached compliance results and fit diffs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{SlotCategory, Verdict};
use crate::fitting::{Quantity, TypeId};

/// One line of a diff: `qty` units of `type_id` missing or extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffEntry {
    pub type_id: TypeId,
    pub qty: Quantity,
}

/// Missing and extra modules per slot category. Categories with no entries
/// are absent from the maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FitDiff {
    pub missing: BTreeMap<SlotCategory, Vec<DiffEntry>>,
    pub extra: BTreeMap<SlotCategory, Vec<DiffEntry>>,
}

impl FitDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Fit-check outcome cached on a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceResult {
    /// `None` when the hull is unknown and nothing could be compared.
    pub verdict: Option<Verdict>,
    pub best_fit_id: Option<String>,
    pub best_fit_name: Option<String>,
    pub match_pct: Option<f64>,
    pub no_rigs: bool,
    pub diff: Option<FitDiff>,
    pub computed_at: DateTime<Utc>,
}

impl ComplianceResult {
    /// Status string for the indexed `fitcheck_status` column.
    #[must_use]
    pub fn status(&self) -> &'static str {
        self.verdict.map_or("", Verdict::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_serializes_with_slot_keys() {
        let mut diff = FitDiff::default();
        diff.missing.insert(
            SlotCategory::Mid,
            vec![DiffEntry {
                type_id: 111,
                qty: 1,
            }],
        );
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"missing": {"mid": [{"type_id": 111, "qty": 1}]}, "extra": {}})
        );
        let back: FitDiff = serde_json::from_value(json).unwrap();
        assert_eq!(back, diff);
    }

    #[test]
    fn empty_verdict_has_empty_status() {
        let result = ComplianceResult {
            verdict: None,
            best_fit_id: None,
            best_fit_name: None,
            match_pct: None,
            no_rigs: true,
            diff: None,
            computed_at: Utc::now(),
        };
        assert_eq!(result.status(), "");
    }
}
