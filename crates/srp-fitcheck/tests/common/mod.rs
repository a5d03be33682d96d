//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use srp_config::FitCheckConfig;
use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;
use srp_core::killmail::{Killmail, KillmailItem, Victim};
use srp_db::SrpDb;
use srp_esi::{Resolver, ResolverError};
use srp_fitcheck::FitCheckEngine;

pub const RIFTER: TypeId = 587;
pub const DAMAGE_CONTROL: TypeId = 2048;
pub const WARP_SCRAMBLER: TypeId = 5443;
pub const MICROWARPDRIVE: TypeId = 440;
pub const AUTOCANNON: TypeId = 2873;
pub const CDFE: TypeId = 31_788;

pub const TACKLE_RIFTER: &str = "\
[Rifter, Tackle]
Damage Control II

Warp Scrambler II
5MN Microwarpdrive II

200mm AutoCannon II x3

Small Core Defense Field Extender I x2

Warrior II x5
";

/// One call made against the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Names(Vec<String>),
    TypeName(TypeId),
    Entity(EntityKind, i64),
}

/// In-memory resolver with a fixed name table and a call log.
pub struct ScriptedResolver {
    types: HashMap<String, TypeId>,
    entities: HashMap<(EntityKind, i64), String>,
    failing: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        let types = [
            ("Rifter", RIFTER),
            ("Damage Control II", DAMAGE_CONTROL),
            ("Warp Scrambler II", WARP_SCRAMBLER),
            ("5MN Microwarpdrive II", MICROWARPDRIVE),
            ("200mm AutoCannon II", AUTOCANNON),
            ("Small Core Defense Field Extender I", CDFE),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id))
        .collect();
        let entities = HashMap::from([
            ((EntityKind::Corporation, 98_000_001), "Tackle Works".to_string()),
            ((EntityKind::Alliance, 99_000_001), "Rifter Union".to_string()),
        ]);
        Self {
            types,
            entities,
            failing: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every call fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<(), ResolverError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ResolverError::Api {
                status: 503,
                message: "service unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve_names(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, TypeId>, ResolverError> {
        self.record(Call::Names(names.to_vec()))?;
        // Always includes the hull, requested or not.
        let mut found: HashMap<String, TypeId> = names
            .iter()
            .filter_map(|name| self.types.get(name).map(|id| (name.clone(), *id)))
            .collect();
        found.insert("Rifter".into(), RIFTER);
        Ok(found)
    }

    async fn resolve_type_name(&self, type_id: TypeId) -> Result<Option<String>, ResolverError> {
        self.record(Call::TypeName(type_id))?;
        Ok(self
            .types
            .iter()
            .find(|(_, id)| **id == type_id)
            .map(|(name, _)| name.clone()))
    }

    async fn resolve_entity_name(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.record(Call::Entity(kind, id))?;
        Ok(self.entities.get(&(kind, id)).cloned())
    }
}

pub async fn test_engine() -> FitCheckEngine<ScriptedResolver> {
    test_engine_with(FitCheckConfig::default(), 100).await
}

pub async fn test_engine_with(
    config: FitCheckConfig,
    batch_size: usize,
) -> FitCheckEngine<ScriptedResolver> {
    let db = SrpDb::open_local(":memory:").await.unwrap();
    FitCheckEngine::new(db, ScriptedResolver::new(), config, batch_size)
}

pub fn item(flag: i64, type_id: TypeId, destroyed: i64, dropped: i64) -> KillmailItem {
    KillmailItem {
        flag,
        item_type_id: Some(type_id),
        quantity_destroyed: Some(destroyed),
        quantity_dropped: Some(dropped),
    }
}

pub fn killmail(ship_type_id: Option<TypeId>, items: Vec<KillmailItem>) -> Killmail {
    Killmail {
        killmail_id: Some(118_000_001),
        victim: Victim {
            ship_type_id,
            items,
            ..Victim::default()
        },
        ..Killmail::default()
    }
}

/// A Rifter fitted exactly like [`TACKLE_RIFTER`], plus cargo.
pub fn tackle_loss() -> Killmail {
    killmail(
        Some(RIFTER),
        vec![
            item(11, DAMAGE_CONTROL, 1, 0),
            item(19, WARP_SCRAMBLER, 0, 1),
            item(20, MICROWARPDRIVE, 1, 0),
            item(27, AUTOCANNON, 1, 0),
            item(28, AUTOCANNON, 1, 0),
            item(29, AUTOCANNON, 0, 1),
            item(92, CDFE, 1, 0),
            item(93, CDFE, 1, 0),
            item(5, 12_779, 800, 200),
        ],
    )
}
