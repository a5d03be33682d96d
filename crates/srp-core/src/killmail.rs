//! Typed killmail record.
//!
//! Mirrors the ESI `/killmails/{id}/{hash}/` payload with every field optional:
//! killmails are stored as submitted and read back long after, so a missing or
//! `null` field means "absent" (or zero for quantities) rather than a decode
//! error. Unknown fields are ignored.
//!
//! Item fields also accept the short names `position_code`, `type_id`,
//! `qty_destroyed` and `qty_dropped`.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fitting::{Quantity, TypeId};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A killmail: one ship destruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Killmail {
    #[serde(default)]
    pub killmail_id: Option<i64>,
    #[serde(default)]
    pub killmail_time: Option<String>,
    #[serde(default)]
    pub solar_system_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Victim")]
    pub victim: Victim,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Vec<Attacker>")]
    pub attackers: Vec<Attacker>,
}

/// The destroyed ship and its pilot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Victim {
    #[serde(default)]
    pub character_id: Option<i64>,
    #[serde(default)]
    pub corporation_id: Option<i64>,
    #[serde(default)]
    pub alliance_id: Option<i64>,
    #[serde(default)]
    pub ship_type_id: Option<TypeId>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Vec<KillmailItem>")]
    pub items: Vec<KillmailItem>,
}

/// One stack of items on the victim's ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KillmailItem {
    /// Inventory flag (slot position). Missing means 0, which no slot uses.
    #[serde(default, alias = "position_code", deserialize_with = "null_as_default")]
    #[schemars(with = "i64")]
    pub flag: i64,
    #[serde(default, alias = "type_id")]
    pub item_type_id: Option<TypeId>,
    #[serde(default, alias = "qty_destroyed")]
    pub quantity_destroyed: Option<i64>,
    #[serde(default, alias = "qty_dropped")]
    pub quantity_dropped: Option<i64>,
}

impl KillmailItem {
    /// Destroyed plus dropped, with missing or negative counts read as zero.
    #[must_use]
    pub fn total_quantity(&self) -> Quantity {
        let destroyed = self.quantity_destroyed.unwrap_or(0).max(0);
        let dropped = self.quantity_dropped.unwrap_or(0).max(0);
        u64::try_from(destroyed.saturating_add(dropped)).unwrap_or(0)
    }
}

/// A participant on the killing side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attacker {
    /// `None` for NPC attackers.
    #[serde(default)]
    pub character_id: Option<i64>,
    #[serde(default)]
    pub corporation_id: Option<i64>,
    #[serde(default)]
    pub alliance_id: Option<i64>,
    #[serde(default)]
    pub damage_done: Option<i64>,
    #[serde(default)]
    pub ship_type_id: Option<TypeId>,
}

impl Killmail {
    /// Hull type of the destroyed ship, if recorded.
    #[must_use]
    pub const fn ship_type_id(&self) -> Option<TypeId> {
        self.victim.ship_type_id
    }
}
