//! The name-lookup seam between the fit checker and ESI.

use std::collections::HashMap;

use async_trait::async_trait;
use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;

use crate::error::ResolverError;

/// External name ↔ identifier lookups.
///
/// Implementations make one remote round-trip per call and never cache;
/// caching lives in the fit checker's name cache.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve exact item names to type IDs. Names the service does not know
    /// are absent from the map.
    async fn resolve_names(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, TypeId>, ResolverError>;

    /// Name of one type, or `None` when the service has no name for it.
    async fn resolve_type_name(&self, type_id: TypeId) -> Result<Option<String>, ResolverError>;

    /// Name of one corporation or alliance.
    async fn resolve_entity_name(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<String>, ResolverError>;
}
