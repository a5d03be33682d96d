//! Slot categories, compliance verdicts, and name-cache entity kinds.
//!
//! `SlotCategory` and `EntityKind` use `snake_case` serialization; `Verdict`
//! keeps the upper-case tags reviewers see (`FIT_OK`, `NO_DOCTRINE_FIT`, ...).
//! Every enum exposes `as_str()` returning the exact string stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SlotCategory
// ---------------------------------------------------------------------------

/// Where an item sits on a ship.
///
/// Only the four fitted categories take part in fit comparison. `Cargo`,
/// `DroneBay` and `Other` are produced by the classifier in extended mode and
/// are used for display grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    High,
    Mid,
    Low,
    Rig,
    Cargo,
    DroneBay,
    Other,
}

impl SlotCategory {
    /// The four categories compared between actual and reference fits.
    pub const FITTED: [Self; 4] = [Self::High, Self::Mid, Self::Low, Self::Rig];

    /// Display order for grouped item previews.
    pub const DISPLAY_ORDER: [Self; 7] = [
        Self::High,
        Self::Mid,
        Self::Low,
        Self::Rig,
        Self::Cargo,
        Self::DroneBay,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
            Self::Rig => "rig",
            Self::Cargo => "cargo",
            Self::DroneBay => "drone_bay",
            Self::Other => "other",
        }
    }

    /// Human-readable group heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Slots",
            Self::Mid => "Mid Slots",
            Self::Low => "Low Slots",
            Self::Rig => "Rigs",
            Self::Cargo => "Cargo",
            Self::DroneBay => "Drone Bay",
            Self::Other => "Other",
        }
    }

    /// Whether this category takes part in fit comparison.
    #[must_use]
    pub const fn is_fitted(self) -> bool {
        matches!(self, Self::High | Self::Mid | Self::Low | Self::Rig)
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Compliance verdict for a claim.
///
/// The "unknown hull" outcome is not a variant: it is represented as
/// `Option::<Verdict>::None` and stored as an empty status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    NoDoctrineFit,
    FitOk,
    FitClose,
    FitMismatch,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoDoctrineFit => "NO_DOCTRINE_FIT",
            Self::FitOk => "FIT_OK",
            Self::FitClose => "FIT_CLOSE",
            Self::FitMismatch => "FIT_MISMATCH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind-scoped identifier spaces in the entity name cache.
///
/// Corporation and alliance IDs are not globally unique against each other,
/// so their names are cached under `(kind, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[serde(rename = "corp")]
    Corporation,
    Alliance,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Corporation => "corp",
            Self::Alliance => "alliance",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_category_serde_matches_as_str() {
        for slot in SlotCategory::DISPLAY_ORDER {
            let json = serde_json::to_value(slot).unwrap();
            assert_eq!(json, serde_json::Value::String(slot.as_str().to_string()));
        }
    }

    #[test]
    fn only_four_categories_are_fitted() {
        let fitted: Vec<_> = SlotCategory::DISPLAY_ORDER
            .into_iter()
            .filter(|s| s.is_fitted())
            .collect();
        assert_eq!(fitted, SlotCategory::FITTED.to_vec());
    }

    #[test]
    fn verdict_serde_matches_as_str() {
        for verdict in [
            Verdict::NoDoctrineFit,
            Verdict::FitOk,
            Verdict::FitClose,
            Verdict::FitMismatch,
        ] {
            let json = serde_json::to_value(verdict).unwrap();
            assert_eq!(json, serde_json::Value::String(verdict.as_str().to_string()));
        }
    }

    #[test]
    fn entity_kind_serializes_like_storage() {
        assert_eq!(
            serde_json::to_value(EntityKind::Corporation).unwrap(),
            serde_json::json!("corp")
        );
        assert_eq!(
            serde_json::to_value(EntityKind::Alliance).unwrap(),
            serde_json::json!("alliance")
        );
    }
}
