//! Type-name and entity-name cache tables.
//!
//! Append-mostly: rows are never updated or expired, and duplicate-key
//! writes are ignored so racing writers cannot fail each other.

use std::collections::HashMap;

use chrono::Utc;
use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;

use crate::SrpDb;
use crate::error::DatabaseError;
use crate::helpers::{IN_CHUNK, placeholders};

impl SrpDb {
    /// Cached type IDs for exact names. Names without a row are absent.
    ///
    /// When several IDs share a name the smallest wins.
    pub async fn cached_type_ids(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, TypeId>, DatabaseError> {
        let mut found = HashMap::new();
        for chunk in names.chunks(IN_CHUNK) {
            let sql = format!(
                "SELECT name, type_id FROM type_name_cache WHERE name IN ({}) ORDER BY type_id",
                placeholders(1, chunk.len())
            );
            let params: Vec<libsql::Value> = chunk.iter().map(|n| n.as_str().into()).collect();
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(params))
                .await?;
            while let Some(row) = rows.next().await? {
                found
                    .entry(row.get::<String>(0)?)
                    .or_insert(row.get::<i64>(1)?);
            }
        }
        Ok(found)
    }

    /// Cached names for type IDs. IDs without a row are absent.
    pub async fn cached_type_names(
        &self,
        type_ids: &[TypeId],
    ) -> Result<HashMap<TypeId, String>, DatabaseError> {
        let mut found = HashMap::new();
        for chunk in type_ids.chunks(IN_CHUNK) {
            let sql = format!(
                "SELECT type_id, name FROM type_name_cache WHERE type_id IN ({})",
                placeholders(1, chunk.len())
            );
            let params: Vec<libsql::Value> = chunk.iter().map(|id| (*id).into()).collect();
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(params))
                .await?;
            while let Some(row) = rows.next().await? {
                found.insert(row.get::<i64>(0)?, row.get::<String>(1)?);
            }
        }
        Ok(found)
    }

    /// Insert `(type_id, name)` rows, ignoring IDs already cached.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn store_type_names(
        &self,
        entries: &[(TypeId, String)],
    ) -> Result<u64, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let mut inserted = 0;
        for (type_id, name) in entries {
            inserted += self
                .conn()
                .execute(
                    "INSERT INTO type_name_cache (type_id, name, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(type_id) DO NOTHING",
                    libsql::params![*type_id, name.as_str(), now.as_str()],
                )
                .await?;
        }
        Ok(inserted)
    }

    /// Cached names for corporation or alliance IDs.
    pub async fn cached_entity_names(
        &self,
        kind: EntityKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, String>, DatabaseError> {
        let mut found = HashMap::new();
        for chunk in ids.chunks(IN_CHUNK) {
            let sql = format!(
                "SELECT entity_id, name FROM entity_name_cache
                 WHERE entity_kind = ?1 AND entity_id IN ({})",
                placeholders(2, chunk.len())
            );
            let mut params: Vec<libsql::Value> = vec![kind.as_str().into()];
            params.extend(chunk.iter().map(|id| libsql::Value::from(*id)));
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(params))
                .await?;
            while let Some(row) = rows.next().await? {
                found.insert(row.get::<i64>(0)?, row.get::<String>(1)?);
            }
        }
        Ok(found)
    }

    /// Insert `(id, name)` rows for one entity kind, ignoring existing keys.
    pub async fn store_entity_names(
        &self,
        kind: EntityKind,
        entries: &[(i64, String)],
    ) -> Result<u64, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let mut inserted = 0;
        for (id, name) in entries {
            inserted += self
                .conn()
                .execute(
                    "INSERT INTO entity_name_cache (entity_kind, entity_id, name, updated_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(entity_kind, entity_id) DO NOTHING",
                    libsql::params![kind.as_str(), *id, name.as_str(), now.as_str()],
                )
                .await?;
        }
        Ok(inserted)
    }
}
