//! ESI HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use srp_config::EsiConfig;
use srp_core::enums::EntityKind;
use srp_core::fitting::TypeId;
use srp_core::killmail::Killmail;

use crate::error::ResolverError;
use crate::http::{check_response, read_json};
use crate::resolver::Resolver;

/// `POST /universe/ids/` response. Only the item-type section is used.
#[derive(Debug, Default, Deserialize)]
struct IdsResponse {
    #[serde(default)]
    inventory_types: Option<Vec<IdName>>,
}

#[derive(Debug, Deserialize)]
struct IdName {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}

/// Any ESI object carrying a `name` field (types, corporations, alliances).
#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: Option<String>,
}

impl IdsResponse {
    fn into_type_map(self) -> HashMap<String, TypeId> {
        self.inventory_types
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                let name = row.name?.trim().to_string();
                let id = row.id.filter(|id| *id != 0)?;
                (!name.is_empty()).then_some((name, id))
            })
            .collect()
    }
}

impl Named {
    fn into_name(self) -> Option<String> {
        self.name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
    }
}

/// HTTP client for the EVE Swagger Interface.
pub struct EsiClient {
    http: reqwest::Client,
    api_base: String,
    datasource: String,
}

impl EsiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &EsiConfig) -> Result<Self, ResolverError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base(),
            datasource: config.datasource.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/?datasource={}",
            self.api_base,
            path.trim_matches('/'),
            self.datasource
        )
    }

    /// GET a named object. A 404 means "no such entity" and yields `None`.
    async fn get_name(&self, path: &str) -> Result<Option<String>, ResolverError> {
        let resp = self.http.get(self.url(path)).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let named: Named = read_json(check_response(resp).await?).await?;
        Ok(named.into_name())
    }

    /// Fetch a killmail by ID and hash.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] if the request fails, ESI returns a
    /// non-success status, or the body is not a killmail.
    pub async fn fetch_killmail(
        &self,
        killmail_id: i64,
        hash: &str,
    ) -> Result<Killmail, ResolverError> {
        let url = self.url(&format!("killmails/{killmail_id}/{hash}"));
        tracing::debug!(killmail_id, "esi: fetching killmail");
        let resp = check_response(self.http.get(url).send().await?).await?;
        read_json(resp).await
    }
}

#[async_trait]
impl Resolver for EsiClient {
    async fn resolve_names(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, TypeId>, ResolverError> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let resp = self
            .http
            .post(self.url("universe/ids"))
            .json(names)
            .send()
            .await?;
        let data: IdsResponse = read_json(check_response(resp).await?).await?;
        Ok(data.into_type_map())
    }

    async fn resolve_type_name(&self, type_id: TypeId) -> Result<Option<String>, ResolverError> {
        self.get_name(&format!("universe/types/{type_id}")).await
    }

    async fn resolve_entity_name(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<String>, ResolverError> {
        let path = match kind {
            EntityKind::Corporation => format!("corporations/{id}"),
            EntityKind::Alliance => format!("alliances/{id}"),
        };
        self.get_name(&path).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const IDS_FIXTURE: &str = r#"{
        "inventory_types": [
            {"id": 2048, "name": "Damage Control II"},
            {"id": 5443, "name": " Warp Scrambler II "},
            {"id": 0, "name": "Broken Row"},
            {"name": "No Id"}
        ],
        "characters": [{"id": 90000001, "name": "Damage Control II"}]
    }"#;

    #[test]
    fn parse_ids_response_keeps_valid_type_rows() {
        let data: IdsResponse = serde_json::from_str(IDS_FIXTURE).unwrap();
        let map = data.into_type_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Damage Control II"), Some(&2048));
        assert_eq!(map.get("Warp Scrambler II"), Some(&5443));
    }

    #[test]
    fn parse_ids_response_without_types() {
        let data: IdsResponse = serde_json::from_str(r#"{"systems": []}"#).unwrap();
        assert!(data.into_type_map().is_empty());
        let data: IdsResponse = serde_json::from_str(r#"{"inventory_types": null}"#).unwrap();
        assert!(data.into_type_map().is_empty());
    }

    #[test]
    fn parse_named_objects() {
        let ty: Named = serde_json::from_str(
            r#"{"name": "Rifter", "group_id": 25, "published": true, "type_id": 587}"#,
        )
        .unwrap();
        assert_eq!(ty.into_name().as_deref(), Some("Rifter"));

        let blank: Named = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert_eq!(blank.into_name(), None);

        let missing: Named = serde_json::from_str(r#"{"ticker": "ABC"}"#).unwrap();
        assert_eq!(missing.into_name(), None);
    }

    #[test]
    fn urls_carry_datasource() {
        let client = EsiClient::new(&EsiConfig {
            base_url: "http://esi.local/".into(),
            ..EsiConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.url("/universe/types/587/"),
            "http://esi.local/latest/universe/types/587/?datasource=tranquility"
        );
        assert_eq!(
            client.url("killmails/1/ab"),
            "http://esi.local/latest/killmails/1/ab/?datasource=tranquility"
        );
    }
}
