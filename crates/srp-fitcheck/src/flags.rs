//! Attacker summary flags shown to reviewers next to a claim.

use std::collections::HashSet;

use serde::Serialize;
use srp_config::StandingsConfig;
use srp_core::killmail::{Attacker, Killmail};

/// Alliance and corporation lists an attacker is checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    pub self_alliance_ids: HashSet<i64>,
    pub blue_alliance_ids: HashSet<i64>,
    pub blue_corp_ids: HashSet<i64>,
}

impl From<&StandingsConfig> for Standings {
    fn from(config: &StandingsConfig) -> Self {
        Self {
            self_alliance_ids: config.self_alliance_ids.iter().copied().collect(),
            blue_alliance_ids: config.blue_alliance_ids.iter().copied().collect(),
            blue_corp_ids: config.blue_corp_ids.iter().copied().collect(),
        }
    }
}

impl Standings {
    fn is_blue(&self, attacker: &Attacker) -> bool {
        attacker
            .alliance_id
            .is_some_and(|id| self.blue_alliance_ids.contains(&id))
            || attacker
                .corporation_id
                .is_some_and(|id| self.blue_corp_ids.contains(&id))
    }

    fn is_own(&self, attacker: &Attacker) -> bool {
        attacker
            .alliance_id
            .is_some_and(|id| self.self_alliance_ids.contains(&id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KillmailFlags {
    pub npc_count: u64,
    pub player_count: u64,
    pub npc_damage: i64,
    pub player_damage: i64,
    /// Share of total damage, 1 dp. Zero when no damage was recorded.
    pub npc_damage_pct: f64,
    pub player_damage_pct: f64,
    /// Only NPCs on the mail.
    pub npc_only: bool,
    pub npc_present: bool,
    /// A player attacker from a blue alliance or corporation.
    pub blue_involved: bool,
    /// A player attacker from one of our own alliances.
    pub friendly_fire: bool,
}

fn pct1(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = part as f64 * 100.0 / total as f64;
    (pct * 10.0).round() / 10.0
}

/// Summarize a killmail's attackers.
///
/// An attacker without a character is an NPC. Missing damage counts as zero.
#[must_use]
pub fn killmail_flags(killmail: &Killmail, standings: &Standings) -> KillmailFlags {
    let mut flags = KillmailFlags::default();
    for attacker in &killmail.attackers {
        let damage = attacker.damage_done.unwrap_or(0).max(0);
        if attacker.character_id.is_some_and(|id| id != 0) {
            flags.player_count += 1;
            flags.player_damage += damage;
            flags.blue_involved |= standings.is_blue(attacker);
            flags.friendly_fire |= standings.is_own(attacker);
        } else {
            flags.npc_count += 1;
            flags.npc_damage += damage;
        }
    }
    let total = flags.npc_damage + flags.player_damage;
    flags.npc_damage_pct = pct1(flags.npc_damage, total);
    flags.player_damage_pct = pct1(flags.player_damage, total);
    flags.npc_only = flags.player_count == 0 && flags.npc_count > 0;
    flags.npc_present = flags.npc_count > 0;
    flags
}
