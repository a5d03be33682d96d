use srp_config::SrpConfig;

const SECTIONS: [&str; 4] = ["SRP_ESI", "SRP_DATABASE", "SRP_FITCHECK", "SRP_STANDINGS"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SrpConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SrpConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("{section}_");
        let double = format!("{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{key} is ignored. Nested keys use double underscores (example: {double}{}).",
                &key[single.len()..]
            ));
        }
    }

    if !config.standings.is_configured() {
        warnings.push(
            "No standings configured; blue-involvement flags will always be false.".to_string(),
        );
    }

    warnings
}
