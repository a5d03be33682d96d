//! Claim repository: killmail snapshot plus the cached fit-check result.

use chrono::Utc;
use srp_core::compliance::ComplianceResult;
use srp_core::entities::Claim;
use srp_core::ids::PREFIX_CLAIM;
use srp_core::killmail::Killmail;

use crate::SrpDb;
use crate::error::DatabaseError;
use crate::helpers::{get_flag, get_opt_string, parse_datetime, parse_optional_json};

const CLAIM_COLUMNS: &str = "id, killmail_id, killmail_hash, killmail_raw, ship_type_id, \
     ship_name, fitcheck_selected_fit_id, fitcheck_data, no_rigs_flag, submitted_at";

/// Fields for a new claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewClaim<'a> {
    pub killmail_id: Option<i64>,
    pub killmail_hash: Option<&'a str>,
    /// Killmail snapshot. The claim's hull is taken from its victim.
    pub killmail: Option<&'a Killmail>,
    pub ship_name: Option<&'a str>,
}

fn row_to_claim(row: &libsql::Row) -> Result<Claim, DatabaseError> {
    let killmail_raw = get_opt_string(row, 3)?;
    let fitcheck_data = get_opt_string(row, 7)?;
    Ok(Claim {
        id: row.get::<String>(0)?,
        killmail_id: row.get::<Option<i64>>(1)?,
        killmail_hash: get_opt_string(row, 2)?,
        killmail: parse_optional_json(killmail_raw.as_deref())?,
        ship_type_id: row.get::<Option<i64>>(4)?,
        ship_name: get_opt_string(row, 5)?,
        selected_fit_id: get_opt_string(row, 6)?,
        compliance: parse_optional_json(fitcheck_data.as_deref())?,
        no_rigs_flag: get_flag(row, 8)?,
        submitted_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn not_found(id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "claim",
        id: id.to_string(),
    }
}

impl SrpDb {
    pub async fn create_claim(&self, new: &NewClaim<'_>) -> Result<Claim, DatabaseError> {
        let id = self.generate_id(PREFIX_CLAIM).await?;
        let now = Utc::now().to_rfc3339();
        let killmail_raw = new
            .killmail
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DatabaseError::Other(e.into()))?;
        let ship_type_id = new.killmail.and_then(Killmail::ship_type_id);

        self.conn()
            .execute(
                "INSERT INTO claims (id, killmail_id, killmail_hash, killmail_raw, ship_type_id, ship_name, submitted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    new.killmail_id,
                    new.killmail_hash,
                    killmail_raw,
                    ship_type_id,
                    new.ship_name,
                    now.as_str()
                ],
            )
            .await?;

        tracing::debug!(claim_id = %id, ?ship_type_id, "db: created claim");
        self.get_claim(&id).await
    }

    pub async fn get_claim(&self, id: &str) -> Result<Claim, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_claim(&row)
    }

    /// Store a freshly computed fit-check result on a claim.
    ///
    /// Writes the status column, best-fit reference, JSON payload, computed-at
    /// timestamp and the no-rigs flag. The reviewer-selected fit is left alone.
    pub async fn save_compliance(
        &self,
        claim_id: &str,
        result: &ComplianceResult,
    ) -> Result<(), DatabaseError> {
        let payload = serde_json::to_string(result).map_err(|e| DatabaseError::Other(e.into()))?;
        let updated = self
            .conn()
            .execute(
                "UPDATE claims
                 SET fitcheck_status = ?1, fitcheck_best_fit_id = ?2, fitcheck_data = ?3,
                     fitcheck_updated_at = ?4, no_rigs_flag = ?5
                 WHERE id = ?6",
                libsql::params![
                    result.status(),
                    result.best_fit_id.as_deref(),
                    payload,
                    result.computed_at.to_rfc3339(),
                    i64::from(result.no_rigs),
                    claim_id
                ],
            )
            .await?;
        if updated == 0 {
            return Err(not_found(claim_id));
        }
        Ok(())
    }

    /// Record (or clear) the fit a reviewer picked for this claim.
    pub async fn select_claim_fit(
        &self,
        claim_id: &str,
        fit_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let updated = self
            .conn()
            .execute(
                "UPDATE claims SET fitcheck_selected_fit_id = ?1 WHERE id = ?2",
                libsql::params![fit_id, claim_id],
            )
            .await?;
        if updated == 0 {
            return Err(not_found(claim_id));
        }
        Ok(())
    }
}
