use figment::Jail;
use srp_config::SrpConfig;

#[test]
fn env_vars_fill_config_values() {
    Jail::expect_with(|jail| {
        jail.set_env("SRP_ESI__BASE_URL", "http://esi.local");
        jail.set_env("SRP_DATABASE__PATH", ":memory:");
        jail.set_env("SRP_DATABASE__BUSY_TIMEOUT_MS", "250");

        let config = SrpConfig::load().expect("config loads");
        assert_eq!(config.esi.base_url, "http://esi.local");
        assert!(config.database.is_in_memory());
        assert_eq!(
            config.database.busy_timeout(),
            std::time::Duration::from_millis(250)
        );
        Ok(())
    });
}

#[test]
fn invalid_env_value_is_a_config_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SRP_ESI__NAME_BATCH_SIZE", "0");

        let err = SrpConfig::load().unwrap_err();
        assert!(err.to_string().contains("esi.name_batch_size"));
        Ok(())
    });
}
