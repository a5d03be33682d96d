use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SlotCategory;
use crate::fitting::{Fitting, Quantity, TypeId};

/// One stored doctrine fit for one hull. A hull may have several variants;
/// only `active` ones are scored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReferenceFit {
    pub id: String,
    pub ship_type_id: TypeId,
    pub ship_name: String,
    /// Fit title from the EFT header, e.g. `"TigersClaw - DPS - V25.1"`.
    pub name: String,
    /// EFT text the fit was imported from.
    pub eft_text: String,
    pub active: bool,
    pub items: Vec<ReferenceFitItem>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One module row of a reference fit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReferenceFitItem {
    pub slot: SlotCategory,
    pub type_id: TypeId,
    pub type_name: String,
    pub qty: Quantity,
}

impl ReferenceFit {
    /// Expected module counts per slot category.
    ///
    /// Rows for non-fitted categories (never written by the importer) are ignored.
    #[must_use]
    pub fn expected_fitting(&self) -> Fitting {
        let mut fitting = Fitting::new();
        for item in &self.items {
            fitting.add(item.slot, item.type_id, item.qty);
        }
        fitting
    }
}
