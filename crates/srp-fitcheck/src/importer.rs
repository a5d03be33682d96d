//! Doctrine fit import from EFT text.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use srp_core::entities::{ReferenceFit, ReferenceFitItem};
use srp_core::fitting::TypeId;
use srp_db::repos::FitWrite;
use srp_esi::Resolver;
use srp_parser::{ParsedFit, parse_eft};

use crate::engine::FitCheckEngine;
use crate::error::FitCheckError;

/// Outcome of an import: the stored fit and the module names that could not
/// be resolved (and were left out of it).
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub fit: ReferenceFit,
    pub unresolved_names: Vec<String>,
}

/// Item rows in EFT block order; names without an ID are returned sorted.
fn build_items(
    parsed: &ParsedFit,
    resolved: &HashMap<String, TypeId>,
) -> (Vec<ReferenceFitItem>, Vec<String>) {
    let mut items = Vec::new();
    let mut unresolved = BTreeSet::new();
    for (slot, counts) in parsed.blocks() {
        for (name, qty) in counts {
            match resolved.get(name) {
                Some(type_id) => items.push(ReferenceFitItem {
                    slot,
                    type_id: *type_id,
                    type_name: name.clone(),
                    qty: *qty,
                }),
                None => {
                    unresolved.insert(name.clone());
                }
            }
        }
    }
    (items, unresolved.into_iter().collect())
}

impl<R: Resolver> FitCheckEngine<R> {
    /// Parse EFT text and store it as a doctrine fit.
    ///
    /// With `overwrite` the named fit is replaced in place (and reactivated);
    /// otherwise a new fit is created. Module names the resolver does not
    /// know are dropped and listed in the report.
    ///
    /// # Errors
    ///
    /// - [`FitCheckError::Parse`] for malformed text
    /// - [`FitCheckError::UnresolvableHull`] when the hull name has no ID
    /// - [`FitCheckError::NotFound`] when `overwrite` names no fit
    ///
    /// Nothing is written in any of these cases.
    pub async fn import_fit(
        &self,
        text: &str,
        actor: Option<&str>,
        overwrite: Option<&str>,
    ) -> Result<ImportReport, FitCheckError> {
        let parsed = parse_eft(text)?;
        if let Some(fit_id) = overwrite {
            self.db().get_fit(fit_id).await?;
        }

        let cache = self.name_cache();
        let hull = cache
            .resolve_names_to_ids(&[parsed.hull.as_str()], self.config().hull_fetch_cap)
            .await?;
        let ship_type_id = hull
            .get(&parsed.hull)
            .copied()
            .ok_or_else(|| FitCheckError::UnresolvableHull {
                hull: parsed.hull.clone(),
            })?;

        let resolved = cache
            .resolve_names_to_ids(&parsed.item_names(), self.config().item_fetch_cap)
            .await?;
        let (items, unresolved_names) = build_items(&parsed, &resolved);
        for name in &unresolved_names {
            tracing::warn!(
                hull = %parsed.hull,
                name = %name,
                "fitcheck: dropped unresolved module"
            );
        }

        let write = FitWrite {
            ship_type_id,
            ship_name: &parsed.hull,
            name: &parsed.title,
            eft_text: text,
            updated_by: actor,
            items: &items,
        };
        let fit = match overwrite {
            Some(fit_id) => self.db().replace_fit(fit_id, &write).await?,
            None => self.db().create_fit(&write).await?,
        };

        tracing::info!(
            fit_id = %fit.id,
            hull = %fit.ship_name,
            title = %fit.name,
            items = fit.items.len(),
            unresolved = unresolved_names.len(),
            replaced = overwrite.is_some(),
            "fitcheck: imported doctrine fit"
        );
        Ok(ImportReport {
            fit,
            unresolved_names,
        })
    }

    /// Replace an existing fit from new EFT text.
    pub async fn overwrite_fit(
        &self,
        fit_id: &str,
        text: &str,
        actor: Option<&str>,
    ) -> Result<ImportReport, FitCheckError> {
        self.import_fit(text, actor, Some(fit_id)).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use srp_core::enums::SlotCategory;

    use super::*;

    #[test]
    fn build_items_keeps_block_order_and_reports_unknowns() {
        let parsed = parse_eft(
            "[Rifter, Tackle]\nDamage Control II\n\nWarp Scrambler II\nMystery Module\n\n200mm AutoCannon II x3\n\nSmall Core Defense Field Extender I\n",
        )
        .unwrap();
        let resolved = HashMap::from([
            ("Damage Control II".to_string(), 2048),
            ("Warp Scrambler II".to_string(), 5443),
            ("200mm AutoCannon II".to_string(), 2873),
        ]);
        let (items, unresolved) = build_items(&parsed, &resolved);

        let rows: Vec<_> = items.iter().map(|i| (i.slot, i.type_id, i.qty)).collect();
        assert_eq!(
            rows,
            vec![
                (SlotCategory::Low, 2048, 1),
                (SlotCategory::Mid, 5443, 1),
                (SlotCategory::High, 2873, 3),
            ]
        );
        assert_eq!(
            unresolved,
            vec!["Mystery Module".to_string(), "Small Core Defense Field Extender I".to_string()]
        );
    }
}
