//! Fit-check fetch caps and verdict thresholds.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_hull_fetch_cap() -> usize {
    5
}

const fn default_item_fetch_cap() -> usize {
    500
}

const fn default_type_name_fetch_cap() -> usize {
    40
}

const fn default_entity_fetch_cap() -> usize {
    40
}

const fn default_ok_threshold() -> f64 {
    0.95
}

const fn default_close_threshold() -> f64 {
    0.75
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FitCheckConfig {
    /// Resolver lookups allowed when resolving a hull name.
    #[serde(default = "default_hull_fetch_cap")]
    pub hull_fetch_cap: usize,

    /// Resolver lookups allowed for the module names of one imported fit.
    #[serde(default = "default_item_fetch_cap")]
    pub item_fetch_cap: usize,

    /// Resolver lookups allowed per type id → name request.
    #[serde(default = "default_type_name_fetch_cap")]
    pub type_name_fetch_cap: usize,

    /// Resolver lookups allowed per corporation/alliance name request.
    #[serde(default = "default_entity_fetch_cap")]
    pub entity_fetch_cap: usize,

    /// Minimum match for `FIT_OK` (with nothing missing).
    #[serde(default = "default_ok_threshold")]
    pub ok_threshold: f64,

    /// Minimum match for `FIT_CLOSE`.
    #[serde(default = "default_close_threshold")]
    pub close_threshold: f64,
}

impl Default for FitCheckConfig {
    fn default() -> Self {
        Self {
            hull_fetch_cap: default_hull_fetch_cap(),
            item_fetch_cap: default_item_fetch_cap(),
            type_name_fetch_cap: default_type_name_fetch_cap(),
            entity_fetch_cap: default_entity_fetch_cap(),
            ok_threshold: default_ok_threshold(),
            close_threshold: default_close_threshold(),
        }
    }
}

impl FitCheckConfig {
    /// Check that both thresholds lie in `[0, 1]` and `close <= ok`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("fitcheck.ok_threshold", self.ok_threshold),
            ("fitcheck.close_threshold", self.close_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        if self.close_threshold > self.ok_threshold {
            return Err(ConfigError::InvalidValue {
                field: "fitcheck.close_threshold".to_string(),
                reason: format!(
                    "{} is above ok_threshold {}",
                    self.close_threshold, self.ok_threshold
                ),
            });
        }
        Ok(())
    }
}
