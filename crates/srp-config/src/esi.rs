//! EVE Swagger Interface client configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://esi.evetech.net".to_string()
}

fn default_datasource() -> String {
    "tranquility".to_string()
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "AllianceHub-SRP/1.0".to_string()
}

/// Names sent per `POST /universe/ids/` request.
const fn default_name_batch_size() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EsiConfig {
    /// ESI root, without the `/latest` version segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `datasource` query parameter.
    #[serde(default = "default_datasource")]
    pub datasource: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_name_batch_size")]
    pub name_batch_size: usize,
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            datasource: default_datasource(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            name_batch_size: default_name_batch_size(),
        }
    }
}

impl EsiConfig {
    /// Versioned API root, e.g. `https://esi.evetech.net/latest`.
    pub fn api_base(&self) -> String {
        format!("{}/latest", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = EsiConfig::default();
        assert_eq!(config.base_url, "https://esi.evetech.net");
        assert_eq!(config.datasource, "tranquility");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.user_agent, "AllianceHub-SRP/1.0");
        assert_eq!(config.name_batch_size, 100);
    }

    #[test]
    fn api_base_strips_trailing_slash() {
        let config = EsiConfig {
            base_url: "http://localhost:8080/".into(),
            ..Default::default()
        };
        assert_eq!(config.api_base(), "http://localhost:8080/latest");
    }
}
