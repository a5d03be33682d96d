//! The fit-check engine: one handle over storage, resolver and settings.
//!
//! Operations are split by concern across `impl FitCheckEngine` blocks:
//! fit import in `importer`, claim intake and evaluation in `claims`, and
//! the lookups and fit management below.

use std::collections::HashMap;

use srp_config::{FitCheckConfig, SrpConfig};
use srp_core::entities::ReferenceFit;
use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;
use srp_db::SrpDb;
use srp_db::repos::FitFilter;
use srp_esi::Resolver;

use crate::compliance::Thresholds;
use crate::error::FitCheckError;
use crate::name_cache::NameResolutionCache;

pub struct FitCheckEngine<R> {
    db: SrpDb,
    resolver: R,
    config: FitCheckConfig,
    name_batch_size: usize,
}

impl<R: Resolver> FitCheckEngine<R> {
    #[must_use]
    pub const fn new(
        db: SrpDb,
        resolver: R,
        config: FitCheckConfig,
        name_batch_size: usize,
    ) -> Self {
        Self {
            db,
            resolver,
            config,
            name_batch_size,
        }
    }

    /// Build from loaded settings (fit-check section plus the ESI batch size).
    #[must_use]
    pub fn from_config(db: SrpDb, resolver: R, config: &SrpConfig) -> Self {
        Self::new(db, resolver, config.fitcheck.clone(), config.esi.name_batch_size)
    }

    #[must_use]
    pub const fn db(&self) -> &SrpDb {
        &self.db
    }

    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    #[must_use]
    pub const fn config(&self) -> &FitCheckConfig {
        &self.config
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from(&self.config)
    }

    #[must_use]
    pub fn name_cache(&self) -> NameResolutionCache<'_, R> {
        NameResolutionCache::new(&self.db, &self.resolver, self.name_batch_size)
    }

    // -- Lookups --------------------------------------------------------

    /// Item names to type IDs, capped like a fit import.
    pub async fn type_ids(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, TypeId>, FitCheckError> {
        Ok(self
            .name_cache()
            .resolve_names_to_ids(names, self.config.item_fetch_cap)
            .await?)
    }

    pub async fn type_names(
        &self,
        type_ids: &[TypeId],
    ) -> Result<HashMap<TypeId, String>, FitCheckError> {
        Ok(self
            .name_cache()
            .resolve_ids_to_names(type_ids, self.config.type_name_fetch_cap)
            .await?)
    }

    pub async fn entity_names(
        &self,
        kind: EntityKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, String>, FitCheckError> {
        Ok(self
            .name_cache()
            .resolve_entity_names(kind, ids, self.config.entity_fetch_cap)
            .await?)
    }

    // -- Fit management -------------------------------------------------

    pub async fn list_fits(&self, filter: FitFilter) -> Result<Vec<ReferenceFit>, FitCheckError> {
        Ok(self.db.list_fits(filter).await?)
    }

    pub async fn get_fit(&self, fit_id: &str) -> Result<ReferenceFit, FitCheckError> {
        Ok(self.db.get_fit(fit_id).await?)
    }

    /// Activate or deactivate a fit. Either way the change counts as a fit
    /// update for claims of that hull.
    pub async fn set_fit_active(
        &self,
        fit_id: &str,
        active: bool,
        actor: Option<&str>,
    ) -> Result<ReferenceFit, FitCheckError> {
        let fit = self.db.set_fit_active(fit_id, active, actor).await?;
        tracing::info!(fit_id, active, "fitcheck: fit activation changed");
        Ok(fit)
    }

    pub async fn delete_fit(&self, fit_id: &str) -> Result<(), FitCheckError> {
        self.db.delete_fit(fit_id).await?;
        tracing::info!(fit_id, "fitcheck: fit deleted");
        Ok(())
    }
}
