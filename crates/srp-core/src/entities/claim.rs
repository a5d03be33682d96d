use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceResult;
use crate::fitting::TypeId;
use crate::killmail::Killmail;

/// A reimbursement claim for one lost ship, with its cached fit check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Claim {
    pub id: String,
    pub killmail_id: Option<i64>,
    pub killmail_hash: Option<String>,
    pub killmail: Option<Killmail>,
    pub ship_type_id: Option<TypeId>,
    pub ship_name: Option<String>,
    /// Last computed compliance result, if any.
    pub compliance: Option<ComplianceResult>,
    /// Fit a reviewer picked by hand. Evaluation never changes it.
    pub selected_fit_id: Option<String>,
    pub no_rigs_flag: bool,
    pub submitted_at: DateTime<Utc>,
}
