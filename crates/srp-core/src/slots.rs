//! Killmail inventory-flag classification.
//!
//! ESI reports where each victim item sat as an integer `flag`:
//!
//! ```text
//! 11..=18  low slots      27..=34  high slots
//! 19..=26  mid slots      92..=94  rig slots
//!       5  cargo hold          87  drone bay
//! ```

use crate::enums::SlotCategory;

/// Inventory flag of the cargo hold.
pub const FLAG_CARGO: i64 = 5;

/// Inventory flag of the drone bay.
pub const FLAG_DRONE_BAY: i64 = 87;

/// Map an inventory flag to a slot category.
///
/// With `extended = false` only the four fitted categories are returned and
/// everything else is `None` (the item is left out of fit comparison). With
/// `extended = true` the function always returns a category: cargo, drone bay,
/// or `Other`.
#[must_use]
pub const fn classify(flag: i64, extended: bool) -> Option<SlotCategory> {
    match flag {
        27..=34 => Some(SlotCategory::High),
        19..=26 => Some(SlotCategory::Mid),
        11..=18 => Some(SlotCategory::Low),
        92..=94 => Some(SlotCategory::Rig),
        _ if !extended => None,
        FLAG_CARGO => Some(SlotCategory::Cargo),
        FLAG_DRONE_BAY => Some(SlotCategory::DroneBay),
        _ => Some(SlotCategory::Other),
    }
}
