//! Similarity score between an actual and an expected fitting.

use serde::Serialize;
use srp_core::fitting::{Fitting, Quantity};

/// Score penalty per extra module, relative to the expected total.
pub const EXTRA_PENALTY: f64 = 0.15;

/// Score reported when the reference fit expects nothing.
pub const EMPTY_REFERENCE_SCORE: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitScore {
    /// `matched / expected_total`, 4 dp.
    pub match_pct: f64,
    pub expected_total: Quantity,
    pub matched: Quantity,
    pub missing: Quantity,
    pub extra: Quantity,
    /// `match_pct` less the extra-module penalty, 4 dp.
    pub score: f64,
}

impl FitScore {
    const EMPTY_REFERENCE: Self = Self {
        match_pct: 0.0,
        expected_total: 0,
        matched: 0,
        missing: 0,
        extra: 0,
        score: EMPTY_REFERENCE_SCORE,
    };
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Score `actual` against `expected`.
///
/// Only module counts in the four fitted categories matter. A reference
/// with no modules scores [`EMPTY_REFERENCE_SCORE`] whatever the actual fit
/// holds, so it never wins against a real reference.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(actual: &Fitting, expected: &Fitting) -> FitScore {
    let expected_total = expected.total();
    if expected_total == 0 {
        return FitScore::EMPTY_REFERENCE;
    }

    let mut matched = 0;
    let mut extra = 0;
    for ((_, want), (_, have)) in expected.slots().zip(actual.slots()) {
        matched += want
            .iter()
            .map(|(type_id, e)| e.min(have.get(type_id)))
            .sum::<Quantity>();
        extra += have
            .iter()
            .map(|(type_id, a)| a.saturating_sub(want.get(type_id)))
            .sum::<Quantity>();
    }

    let total = expected_total as f64;
    let match_pct = matched as f64 / total;
    FitScore {
        match_pct: round4(match_pct),
        expected_total,
        matched,
        missing: expected_total - matched,
        extra,
        score: round4(match_pct - EXTRA_PENALTY * extra as f64 / total),
    }
}
