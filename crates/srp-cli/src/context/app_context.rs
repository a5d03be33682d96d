use std::path::Path;

use anyhow::Context;
use srp_config::{DatabaseConfig, SrpConfig};
use srp_db::SrpDb;
use srp_esi::EsiClient;
use srp_fitcheck::{FitCheckEngine, Standings};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub engine: FitCheckEngine<EsiClient>,
    pub standings: Standings,
    pub config: SrpConfig,
}

impl AppContext {
    /// Open the database (creating its directory if needed) and build the
    /// ESI-backed engine.
    pub async fn init(config: SrpConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            path: db_override.unwrap_or(&config.database.path).to_string(),
            ..config.database.clone()
        };
        if !database.is_in_memory() {
            if let Some(parent) = Path::new(&database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        let db = SrpDb::open_local_with_timeout(&database.path, database.busy_timeout())
            .await
            .with_context(|| format!("failed to open database at {}", database.path))?;
        let esi = EsiClient::new(&config.esi).context("failed to build ESI client")?;
        let engine = FitCheckEngine::from_config(db, esi, &config);
        let standings = Standings::from(&config.standings);

        Ok(Self {
            engine,
            standings,
            config,
        })
    }
}
