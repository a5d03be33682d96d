//! Per-slot missing/extra module lists.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use srp_core::compliance::{DiffEntry, FitDiff};
use srp_core::enums::SlotCategory;
use srp_core::fitting::{Fitting, ModuleMultiset, Quantity, TypeId};

/// Above this actual quantity, surplus of a type is not reported as extra.
/// Ammo and charge stacks land in fitted flags in large counts.
pub const EXTRA_NOISE_THRESHOLD: Quantity = 5;

/// Modules the reference wants that the ship lacked, and surplus modules the
/// ship carried. Entries are ordered by type ID; empty categories are absent.
#[must_use]
pub fn diff(expected: &Fitting, actual: &Fitting) -> FitDiff {
    let mut result = FitDiff::default();
    for ((slot, want), (_, have)) in expected.slots().zip(actual.slots()) {
        let missing = shortfall(want, have, None);
        if !missing.is_empty() {
            result.missing.insert(slot, missing);
        }
        let extra = shortfall(have, want, Some(EXTRA_NOISE_THRESHOLD));
        if !extra.is_empty() {
            result.extra.insert(slot, extra);
        }
    }
    result
}

/// Entries where `lhs` holds more than `rhs`, skipping `lhs` counts above `cap`.
fn shortfall(
    lhs: &ModuleMultiset,
    rhs: &ModuleMultiset,
    cap: Option<Quantity>,
) -> Vec<DiffEntry> {
    lhs.iter()
        .filter(|(_, qty)| cap.is_none_or(|cap| *qty <= cap))
        .filter_map(|(type_id, qty)| {
            let over = qty.saturating_sub(rhs.get(type_id));
            (over > 0).then_some(DiffEntry { type_id, qty: over })
        })
        .collect()
}

/// Flatten one side of a diff: `(slot, entry)` in slot order.
pub fn entries(
    side: &BTreeMap<SlotCategory, Vec<DiffEntry>>,
) -> impl Iterator<Item = (SlotCategory, DiffEntry)> + '_ {
    side.iter()
        .flat_map(|(slot, list)| list.iter().map(move |entry| (*slot, *entry)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSide {
    Missing,
    Extra,
}

/// One reviewer-facing diff row with the module's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub side: DiffSide,
    pub slot: SlotCategory,
    pub type_id: TypeId,
    pub name: String,
    pub qty: Quantity,
}

/// Every type ID a diff mentions, without repeats, in row order.
#[must_use]
pub fn diff_type_ids(diff: &FitDiff) -> Vec<TypeId> {
    let mut ids = Vec::new();
    for (_, entry) in entries(&diff.missing).chain(entries(&diff.extra)) {
        if !ids.contains(&entry.type_id) {
            ids.push(entry.type_id);
        }
    }
    ids
}

/// Missing rows then extra rows, each in slot order. Unknown names fall back
/// to the numeric ID.
#[must_use]
pub fn diff_lines(diff: &FitDiff, names: &HashMap<TypeId, String>) -> Vec<DiffLine> {
    let missing = entries(&diff.missing).map(|row| (DiffSide::Missing, row));
    let extra = entries(&diff.extra).map(|row| (DiffSide::Extra, row));
    missing
        .chain(extra)
        .map(|(side, (slot, entry))| DiffLine {
            side,
            slot,
            type_id: entry.type_id,
            name: names
                .get(&entry.type_id)
                .cloned()
                .unwrap_or_else(|| entry.type_id.to_string()),
            qty: entry.qty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn fitting(entries: &[(SlotCategory, i64, u64)]) -> Fitting {
        let mut fit = Fitting::new();
        for (slot, type_id, qty) in entries {
            fit.add(*slot, *type_id, *qty);
        }
        fit
    }

    #[test]
    fn identical_fits_have_empty_diff() {
        let fit = fitting(&[(SlotCategory::Mid, 111, 1)]);
        assert!(diff(&fit, &fit).is_empty());
    }

    #[test]
    fn reports_missing_and_extra_per_slot() {
        let expected = fitting(&[(SlotCategory::High, 1, 3), (SlotCategory::Low, 9, 1)]);
        let actual = fitting(&[(SlotCategory::High, 1, 1), (SlotCategory::Mid, 7, 2)]);
        let result = diff(&expected, &actual);

        assert_eq!(
            result.missing,
            BTreeMap::from([
                (SlotCategory::High, vec![DiffEntry { type_id: 1, qty: 2 }]),
                (SlotCategory::Low, vec![DiffEntry { type_id: 9, qty: 1 }]),
            ])
        );
        assert_eq!(
            result.extra,
            BTreeMap::from([(SlotCategory::Mid, vec![DiffEntry { type_id: 7, qty: 2 }])])
        );
    }

    #[rstest]
    #[case(5, 0, Some(5))]
    #[case(6, 0, None)]
    #[case(500, 0, None)]
    #[case(7, 3, None)]
    #[case(4, 3, Some(1))]
    fn extra_respects_noise_threshold(
        #[case] actual_qty: u64,
        #[case] expected_qty: u64,
        #[case] reported: Option<u64>,
    ) {
        let expected = fitting(&[
            (SlotCategory::High, 1, expected_qty),
            (SlotCategory::Mid, 2, 1),
        ]);
        let actual = fitting(&[(SlotCategory::High, 1, actual_qty), (SlotCategory::Mid, 2, 1)]);
        let result = diff(&expected, &actual);
        let got = result
            .extra
            .get(&SlotCategory::High)
            .and_then(|list| list.first())
            .map(|entry| entry.qty);
        assert_eq!(got, reported);
    }

    #[test]
    fn entries_flatten_in_slot_order() {
        let expected = fitting(&[
            (SlotCategory::Rig, 3, 1),
            (SlotCategory::High, 1, 1),
            (SlotCategory::High, 2, 1),
        ]);
        let result = diff(&expected, &Fitting::new());
        let flat: Vec<_> = entries(&result.missing)
            .map(|(slot, e)| (slot, e.type_id))
            .collect();
        assert_eq!(
            flat,
            vec![(SlotCategory::High, 1), (SlotCategory::High, 2), (SlotCategory::Rig, 3)]
        );
    }

    #[test]
    fn diff_lines_name_missing_then_extra() {
        let expected = fitting(&[(SlotCategory::Low, 9, 1), (SlotCategory::Mid, 5443, 1)]);
        let actual = fitting(&[(SlotCategory::High, 2873, 2), (SlotCategory::Mid, 5443, 1)]);
        let result = diff(&expected, &actual);
        let names = HashMap::from([(2873, "125mm Gatling AutoCannon II".to_string())]);

        assert_eq!(diff_type_ids(&result), vec![9, 2873]);
        assert_eq!(
            diff_lines(&result, &names),
            vec![
                DiffLine {
                    side: DiffSide::Missing,
                    slot: SlotCategory::Low,
                    type_id: 9,
                    name: "9".into(),
                    qty: 1,
                },
                DiffLine {
                    side: DiffSide::Extra,
                    slot: SlotCategory::High,
                    type_id: 2873,
                    name: "125mm Gatling AutoCannon II".into(),
                    qty: 2,
                },
            ]
        );
    }

    #[test]
    fn empty_diff_has_no_lines() {
        assert!(diff_lines(&FitDiff::default(), &HashMap::new()).is_empty());
        assert!(diff_type_ids(&FitDiff::default()).is_empty());
    }
}
