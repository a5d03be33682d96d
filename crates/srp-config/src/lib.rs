//! # srp-config
//!
//! Layered configuration loading for the SRP fit checker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SRP_*` prefix, `__` as separator)
//! 2. Project-level `.srp/config.toml`
//! 3. User-level `~/.config/srp/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SRP_ESI__BASE_URL` -> `esi.base_url`,
//! `SRP_FITCHECK__ITEM_FETCH_CAP` -> `fitcheck.item_fetch_cap`, etc.
//! Lists take TOML array syntax: `SRP_STANDINGS__BLUE_CORP_IDS=[98000001]`.
//!
//! # Usage
//!
//! ```no_run
//! use srp_config::SrpConfig;
//!
//! let config = SrpConfig::load_with_dotenv().expect("config");
//! println!("ESI root: {}", config.esi.api_base());
//! ```

mod database;
mod error;
mod esi;
mod fitcheck;
mod standings;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use esi::EsiConfig;
pub use fitcheck::FitCheckConfig;
pub use standings::StandingsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SrpConfig {
    #[serde(default)]
    pub esi: EsiConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub fitcheck: FitCheckConfig,
    #[serde(default)]
    pub standings: StandingsConfig,
}

impl SrpConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    /// Fails when the extracted values do not validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".srp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SRP_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.esi.name_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "esi.name_batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.fitcheck.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srp").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing
    /// if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SrpConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.standings.is_configured());
        assert_eq!(config.database.path, "srp.db");
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = SrpConfig::default();
        config.esi.name_batch_size = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
