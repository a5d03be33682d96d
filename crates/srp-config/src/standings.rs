//! Alliance and corporation standings used to flag attackers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StandingsConfig {
    /// Our own alliances.
    #[serde(default)]
    pub self_alliance_ids: Vec<i64>,

    /// Alliances treated as friendly.
    #[serde(default)]
    pub blue_alliance_ids: Vec<i64>,

    /// Corporations treated as friendly regardless of alliance.
    #[serde(default)]
    pub blue_corp_ids: Vec<i64>,
}

impl StandingsConfig {
    pub fn is_configured(&self) -> bool {
        !self.self_alliance_ids.is_empty()
            || !self.blue_alliance_ids.is_empty()
            || !self.blue_corp_ids.is_empty()
    }
}
