use anyhow::Context;

/// Load `.env` from the current directory (if present), then the layered config.
pub fn load_config() -> anyhow::Result<srp_config::SrpConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    srp_config::SrpConfig::load().map_err(anyhow::Error::from)
}
