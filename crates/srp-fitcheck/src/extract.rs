//! Actual fitted modules from a killmail.

use serde::Serialize;
use srp_core::fitting::Fitting;
use srp_core::killmail::Killmail;
use srp_core::slots::classify;

/// Victim items grouped into the four fitted categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFit {
    pub fitting: Fitting,
    /// No rig was on the ship.
    pub no_rigs: bool,
}

/// Group a killmail's victim items by fitted slot.
///
/// Items outside the fitted flag ranges or without a type ID are skipped.
/// Each item counts `destroyed + dropped`, at least 1.
#[must_use]
pub fn extract(killmail: &Killmail) -> ExtractedFit {
    let mut fitting = Fitting::new();
    for item in &killmail.victim.items {
        let Some(slot) = classify(item.flag, false) else {
            continue;
        };
        let Some(type_id) = item.item_type_id.filter(|id| *id != 0) else {
            continue;
        };
        fitting.add(slot, type_id, item.total_quantity().max(1));
    }
    let no_rigs = fitting.rig.total() == 0;
    ExtractedFit { fitting, no_rigs }
}
