//! Read-through name ↔ ID cache in front of a [`Resolver`].
//!
//! Every lookup reads the persistent cache tables first and sends at most
//! `fetch_cap` misses to the resolver. Resolver failures are logged and
//! treated as "nothing resolved"; failed cache writes are logged and
//! ignored. Only reads of the cache tables themselves can fail.

use std::collections::{HashMap, HashSet};

use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;
use srp_db::SrpDb;
use srp_db::error::DatabaseError;
use srp_esi::Resolver;

pub struct NameResolutionCache<'a, R: ?Sized> {
    db: &'a SrpDb,
    resolver: &'a R,
    batch_size: usize,
}

/// Trimmed, non-blank names without repeats, in first-seen order.
fn normalize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Positive IDs without repeats, in first-seen order.
fn normalize_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| *id > 0 && seen.insert(*id))
        .collect()
}

impl<'a, R: Resolver + ?Sized> NameResolutionCache<'a, R> {
    /// `batch_size` bounds each bulk resolver call; zero is treated as one.
    pub fn new(db: &'a SrpDb, resolver: &'a R, batch_size: usize) -> Self {
        Self {
            db,
            resolver,
            batch_size: batch_size.max(1),
        }
    }

    /// Map exact item names to type IDs. Unresolved names are absent.
    pub async fn resolve_names_to_ids<S: AsRef<str>>(
        &self,
        names: &[S],
        fetch_cap: usize,
    ) -> Result<HashMap<String, TypeId>, DatabaseError> {
        let names = normalize_names(names);
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = self.db.cached_type_ids(&names).await?;
        let misses: Vec<String> = names
            .iter()
            .filter(|name| !found.contains_key(*name))
            .take(fetch_cap)
            .cloned()
            .collect();
        tracing::debug!(
            requested = names.len(),
            hits = found.len(),
            fetching = misses.len(),
            "name cache: names → ids"
        );

        let wanted: HashSet<&str> = misses.iter().map(String::as_str).collect();
        let mut learned = Vec::new();
        for batch in misses.chunks(self.batch_size) {
            match self.resolver.resolve_names(batch).await {
                Ok(resolved) => {
                    for (name, type_id) in resolved {
                        if wanted.contains(name.as_str()) && !found.contains_key(&name) {
                            learned.push((type_id, name.clone()));
                            found.insert(name, type_id);
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        batch = batch.len(),
                        "name cache: resolver failed, batch left unresolved"
                    );
                }
            }
        }
        self.store_types(&learned).await;
        Ok(found)
    }

    /// Map type IDs to names. Unresolved IDs are absent.
    pub async fn resolve_ids_to_names(
        &self,
        type_ids: &[TypeId],
        fetch_cap: usize,
    ) -> Result<HashMap<TypeId, String>, DatabaseError> {
        let ids = normalize_ids(type_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = self.db.cached_type_names(&ids).await?;
        let misses = Self::misses(&ids, &found, fetch_cap);
        tracing::debug!(
            requested = ids.len(),
            hits = found.len(),
            fetching = misses.len(),
            "name cache: type ids → names"
        );

        let mut learned = Vec::new();
        for type_id in misses {
            match self.resolver.resolve_type_name(type_id).await {
                Ok(Some(name)) => {
                    learned.push((type_id, name.clone()));
                    found.insert(type_id, name);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%error, type_id, "name cache: resolver failed for type");
                }
            }
        }
        self.store_types(&learned).await;
        Ok(found)
    }

    /// Map corporation or alliance IDs to names. Unresolved IDs are absent.
    pub async fn resolve_entity_names(
        &self,
        kind: EntityKind,
        ids: &[i64],
        fetch_cap: usize,
    ) -> Result<HashMap<i64, String>, DatabaseError> {
        let ids = normalize_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = self.db.cached_entity_names(kind, &ids).await?;
        let misses = Self::misses(&ids, &found, fetch_cap);
        tracing::debug!(
            kind = kind.as_str(),
            requested = ids.len(),
            hits = found.len(),
            fetching = misses.len(),
            "name cache: entity ids → names"
        );

        let mut learned = Vec::new();
        for id in misses {
            match self.resolver.resolve_entity_name(kind, id).await {
                Ok(Some(name)) => {
                    learned.push((id, name.clone()));
                    found.insert(id, name);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        %error,
                        kind = kind.as_str(),
                        id,
                        "name cache: resolver failed for entity"
                    );
                }
            }
        }
        if !learned.is_empty() {
            if let Err(error) = self.db.store_entity_names(kind, &learned).await {
                tracing::warn!(%error, "name cache: failed to store entity names");
            }
        }
        Ok(found)
    }

    fn misses(ids: &[i64], found: &HashMap<i64, String>, fetch_cap: usize) -> Vec<i64> {
        ids.iter()
            .copied()
            .filter(|id| !found.contains_key(id))
            .take(fetch_cap)
            .collect()
    }

    async fn store_types(&self, learned: &[(TypeId, String)]) {
        if learned.is_empty() {
            return;
        }
        match self.db.store_type_names(learned).await {
            Ok(inserted) => tracing::debug!(inserted, "name cache: stored type names"),
            Err(error) => tracing::warn!(%error, "name cache: failed to store type names"),
        }
    }
}
