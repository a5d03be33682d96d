use std::collections::BTreeMap;

use serde::Serialize;
use srp_core::enums::EntityKind;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResolveCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Resolved<K, V> {
    resolved: BTreeMap<K, V>,
    unresolved: Vec<K>,
}

impl<K: Ord + Clone, V> Resolved<K, V> {
    fn split(requested: &[K], mut found: BTreeMap<K, V>, key: impl Fn(&K) -> K) -> Self {
        let mut resolved = BTreeMap::new();
        let mut unresolved = Vec::new();
        for wanted in requested {
            let k = key(wanted);
            match found.remove(&k) {
                Some(value) => {
                    resolved.insert(k, value);
                }
                None if !resolved.contains_key(&k) && !unresolved.contains(&k) => {
                    unresolved.push(k);
                }
                None => {}
            }
        }
        Self {
            resolved,
            unresolved,
        }
    }
}

/// Handle `srp resolve`.
pub async fn handle(
    action: &ResolveCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine = &ctx.engine;
    match action {
        ResolveCommands::Names { names } => {
            let found = engine.type_ids(names).await?.into_iter().collect();
            let result = Resolved::split(names, found, |name| name.trim().to_string());
            output(&result, flags.format)
        }
        ResolveCommands::Ids { ids } => {
            let found = engine.type_names(ids).await?.into_iter().collect();
            output(&Resolved::split(ids, found, |id| *id), flags.format)
        }
        ResolveCommands::Entities { kind, ids } => {
            let kind = EntityKind::from(*kind);
            let found = engine.entity_names(kind, ids).await?.into_iter().collect();
            output(&Resolved::split(ids, found, |id| *id), flags.format)
        }
    }
}
