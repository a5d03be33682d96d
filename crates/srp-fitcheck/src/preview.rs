//! Victim items grouped for display.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use srp_core::enums::SlotCategory;
use srp_core::fitting::TypeId;
use srp_core::killmail::Killmail;
use srp_core::slots::classify;

/// One heading of the fitting preview with its item lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewGroup {
    pub slot: SlotCategory,
    pub label: &'static str,
    pub lines: Vec<String>,
}

/// Type IDs on the victim, in item order, without repeats.
#[must_use]
pub fn item_type_ids(killmail: &Killmail) -> Vec<TypeId> {
    let mut seen = Vec::new();
    for id in killmail.victim.items.iter().filter_map(|item| item.item_type_id) {
        if id != 0 && !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Group victim items under slot headings in display order.
///
/// Lines keep killmail item order within a group and read `"<name> ×<qty>"`,
/// or just the name when nothing was destroyed or dropped. Unknown names
/// fall back to the numeric ID. Groups with no items are left out.
#[must_use]
pub fn group_items(killmail: &Killmail, names: &HashMap<TypeId, String>) -> Vec<PreviewGroup> {
    let mut grouped: BTreeMap<SlotCategory, Vec<String>> = BTreeMap::new();
    for item in &killmail.victim.items {
        let Some(type_id) = item.item_type_id.filter(|id| *id != 0) else {
            continue;
        };
        let slot = classify(item.flag, true).unwrap_or(SlotCategory::Other);
        let name = names
            .get(&type_id)
            .cloned()
            .unwrap_or_else(|| type_id.to_string());
        let qty = item.total_quantity();
        let line = if qty > 0 { format!("{name} ×{qty}") } else { name };
        grouped.entry(slot).or_default().push(line);
    }

    SlotCategory::DISPLAY_ORDER
        .iter()
        .filter_map(|slot| {
            grouped.remove(slot).map(|lines| PreviewGroup {
                slot: *slot,
                label: slot.label(),
                lines,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use srp_core::killmail::{KillmailItem, Victim};

    use super::*;

    fn item(flag: i64, type_id: Option<i64>, destroyed: i64, dropped: i64) -> KillmailItem {
        KillmailItem {
            flag,
            item_type_id: type_id,
            quantity_destroyed: Some(destroyed),
            quantity_dropped: Some(dropped),
        }
    }

    fn killmail(items: Vec<KillmailItem>) -> Killmail {
        Killmail {
            victim: Victim {
                items,
                ..Victim::default()
            },
            ..Killmail::default()
        }
    }

    #[test]
    fn groups_in_display_order() {
        let km = killmail(vec![
            item(5, Some(12_779), 400, 100),
            item(87, Some(2488), 5, 0),
            item(11, Some(2048), 1, 0),
            item(27, Some(2873), 0, 1),
            item(133, Some(9), 1, 0),
        ]);
        let names = HashMap::from([
            (2048, "Damage Control II".to_string()),
            (2873, "200mm AutoCannon II".to_string()),
            (12_779, "Republic Fleet EMP S".to_string()),
            (2488, "Warrior II".to_string()),
        ]);
        let groups = group_items(&km, &names);
        let headings: Vec<_> = groups.iter().map(|g| g.label).collect();
        assert_eq!(headings, vec!["High Slots", "Low Slots", "Cargo", "Drone Bay", "Other"]);
        assert_eq!(groups[0].lines, vec!["200mm AutoCannon II ×1"]);
        assert_eq!(groups[2].lines, vec!["Republic Fleet EMP S ×500"]);
        assert_eq!(groups[4].lines, vec!["9 ×1"]);
    }

    #[test]
    fn zero_quantity_shows_bare_name() {
        let km = killmail(vec![item(20, Some(5443), 0, 0)]);
        let names = HashMap::from([(5443, "Warp Scrambler II".to_string())]);
        let groups = group_items(&km, &names);
        assert_eq!(groups[0].lines, vec!["Warp Scrambler II"]);
    }

    #[test]
    fn untyped_items_are_skipped() {
        let km = killmail(vec![item(20, None, 1, 0), item(20, Some(0), 1, 0)]);
        assert!(group_items(&km, &HashMap::new()).is_empty());
    }

    #[test]
    fn type_ids_are_unique_in_item_order() {
        let km = killmail(vec![
            item(20, Some(3), 1, 0),
            item(21, Some(1), 1, 0),
            item(22, Some(3), 1, 0),
        ]);
        assert_eq!(item_type_ids(&km), vec![3, 1]);
    }
}
