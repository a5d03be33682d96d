//! Module multisets and the four-slot `Fitting`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SlotCategory;

/// EVE type identifier (items, hulls).
pub type TypeId = i64;

/// Item quantity.
pub type Quantity = u64;

/// Type identifier → quantity.
///
/// Absent keys mean zero. Zero quantities are never stored, so two multisets
/// compare equal exactly when they hold the same non-zero counts. Iteration is
/// ordered by type ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ModuleMultiset(BTreeMap<TypeId, Quantity>);

impl ModuleMultiset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `type_id`. Adding zero is a no-op.
    pub fn add(&mut self, type_id: TypeId, qty: Quantity) {
        if qty == 0 {
            return;
        }
        *self.0.entry(type_id).or_insert(0) += qty;
    }

    /// Quantity held for `type_id` (zero when absent).
    #[must_use]
    pub fn get(&self, type_id: TypeId) -> Quantity {
        self.0.get(&type_id).copied().unwrap_or(0)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total(&self) -> Quantity {
        self.0.values().sum()
    }

    /// Number of distinct type IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(type_id, qty)` pairs in type-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, Quantity)> + '_ {
        self.0.iter().map(|(id, qty)| (*id, *qty))
    }
}

impl FromIterator<(TypeId, Quantity)> for ModuleMultiset {
    fn from_iter<I: IntoIterator<Item = (TypeId, Quantity)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (type_id, qty) in iter {
            set.add(type_id, qty);
        }
        set
    }
}

/// High/mid/low/rig contents of one ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fitting {
    #[serde(default)]
    pub high: ModuleMultiset,
    #[serde(default)]
    pub mid: ModuleMultiset,
    #[serde(default)]
    pub low: ModuleMultiset,
    #[serde(default)]
    pub rig: ModuleMultiset,
}

impl Fitting {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiset for a fitted category. `None` for cargo, drone bay and other.
    #[must_use]
    pub const fn slot(&self, slot: SlotCategory) -> Option<&ModuleMultiset> {
        match slot {
            SlotCategory::High => Some(&self.high),
            SlotCategory::Mid => Some(&self.mid),
            SlotCategory::Low => Some(&self.low),
            SlotCategory::Rig => Some(&self.rig),
            SlotCategory::Cargo | SlotCategory::DroneBay | SlotCategory::Other => None,
        }
    }

    pub const fn slot_mut(&mut self, slot: SlotCategory) -> Option<&mut ModuleMultiset> {
        match slot {
            SlotCategory::High => Some(&mut self.high),
            SlotCategory::Mid => Some(&mut self.mid),
            SlotCategory::Low => Some(&mut self.low),
            SlotCategory::Rig => Some(&mut self.rig),
            SlotCategory::Cargo | SlotCategory::DroneBay | SlotCategory::Other => None,
        }
    }

    /// Add to a fitted category. Returns `false` (and does nothing) for
    /// non-fitted categories.
    pub fn add(&mut self, slot: SlotCategory, type_id: TypeId, qty: Quantity) -> bool {
        match self.slot_mut(slot) {
            Some(set) => {
                set.add(type_id, qty);
                true
            }
            None => false,
        }
    }

    /// Iterate the four fitted categories with their multisets.
    pub fn slots(&self) -> impl Iterator<Item = (SlotCategory, &ModuleMultiset)> {
        SlotCategory::FITTED
            .into_iter()
            .filter_map(|slot| self.slot(slot).map(|set| (slot, set)))
    }

    /// Sum of quantities across all four categories.
    #[must_use]
    pub fn total(&self) -> Quantity {
        self.slots().map(|(_, set)| set.total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_and_skips_zero() {
        let mut set = ModuleMultiset::new();
        set.add(111, 1);
        set.add(111, 2);
        set.add(222, 0);
        assert_eq!(set.get(111), 3);
        assert_eq!(set.get(222), 0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.total(), 3);
    }

    #[test]
    fn zero_adds_do_not_break_equality() {
        let mut a = ModuleMultiset::new();
        a.add(1, 1);
        a.add(2, 0);
        let b: ModuleMultiset = [(1, 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn fitting_rejects_non_fitted_slots() {
        let mut fit = Fitting::new();
        assert!(fit.add(SlotCategory::Rig, 31_000, 1));
        assert!(!fit.add(SlotCategory::Cargo, 31_000, 1));
        assert_eq!(fit.total(), 1);
        assert!(fit.slot(SlotCategory::DroneBay).is_none());
    }

    #[test]
    fn multiset_serializes_as_plain_map() {
        let set: ModuleMultiset = [(3, 2), (1, 5)].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"1": 5, "3": 2}));
        let back: ModuleMultiset = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
