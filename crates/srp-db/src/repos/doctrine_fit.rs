//! Doctrine fit repository: CRUD with atomic item replacement.

use chrono::{DateTime, Utc};
use libsql::TransactionBehavior;
use srp_core::entities::{ReferenceFit, ReferenceFitItem};
use srp_core::fitting::TypeId;
use srp_core::ids::PREFIX_DOCTRINE_FIT;

use crate::SrpDb;
use crate::error::DatabaseError;
use crate::helpers::{
    get_flag, get_opt_string, get_quantity, parse_datetime, parse_enum, quantity_param,
};

const FIT_COLUMNS: &str =
    "id, ship_type_id, ship_name, name, eft_text, active, updated_by, created_at, updated_at";

/// Scalar fields and item rows written by create and replace.
#[derive(Debug, Clone, Copy)]
pub struct FitWrite<'a> {
    pub ship_type_id: TypeId,
    pub ship_name: &'a str,
    pub name: &'a str,
    pub eft_text: &'a str,
    pub updated_by: Option<&'a str>,
    pub items: &'a [ReferenceFitItem],
}

/// Listing filter for [`SrpDb::list_fits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FitFilter {
    pub ship_type_id: Option<TypeId>,
    pub include_inactive: bool,
}

/// Fit row without items, as read from `doctrine_fits`.
fn row_to_fit(row: &libsql::Row) -> Result<ReferenceFit, DatabaseError> {
    Ok(ReferenceFit {
        id: row.get::<String>(0)?,
        ship_type_id: row.get::<i64>(1)?,
        ship_name: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        eft_text: row.get::<String>(4)?,
        active: get_flag(row, 5)?,
        items: Vec::new(),
        updated_by: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn row_to_item(row: &libsql::Row) -> Result<ReferenceFitItem, DatabaseError> {
    Ok(ReferenceFitItem {
        slot: parse_enum(&row.get::<String>(0)?)?,
        type_id: row.get::<i64>(1)?,
        type_name: row.get::<String>(2)?,
        qty: get_quantity(row, 3)?,
    })
}

fn not_found(id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "doctrine fit",
        id: id.to_string(),
    }
}

/// Insert item rows for `fit_id` on the given connection (or transaction).
async fn insert_items(
    conn: &libsql::Connection,
    fit_id: &str,
    items: &[ReferenceFitItem],
) -> Result<(), DatabaseError> {
    for item in items {
        if !item.slot.is_fitted() {
            return Err(DatabaseError::InvalidState(format!(
                "doctrine fit item in non-fitted slot '{}'",
                item.slot
            )));
        }
        conn.execute(
            "INSERT INTO doctrine_fit_items (fit_id, slot, type_id, type_name, qty)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                fit_id,
                item.slot.as_str(),
                item.type_id,
                item.type_name.as_str(),
                quantity_param(item.qty)
            ],
        )
        .await?;
    }
    Ok(())
}

async fn write_new_fit(
    conn: &libsql::Connection,
    id: &str,
    now: &str,
    fit: &FitWrite<'_>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctrine_fits
         (id, ship_type_id, ship_name, name, eft_text, active, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7, ?8)",
        libsql::params![
            id,
            fit.ship_type_id,
            fit.ship_name,
            fit.name,
            fit.eft_text,
            fit.updated_by,
            now,
            now
        ],
    )
    .await?;
    insert_items(conn, id, fit.items).await
}

async fn overwrite_fit_rows(
    conn: &libsql::Connection,
    id: &str,
    now: &str,
    fit: &FitWrite<'_>,
) -> Result<(), DatabaseError> {
    let updated = conn
        .execute(
            "UPDATE doctrine_fits
             SET ship_type_id = ?1, ship_name = ?2, name = ?3, eft_text = ?4,
                 active = 1, updated_by = ?5, updated_at = ?6
             WHERE id = ?7",
            libsql::params![
                fit.ship_type_id,
                fit.ship_name,
                fit.name,
                fit.eft_text,
                fit.updated_by,
                now,
                id
            ],
        )
        .await?;
    if updated == 0 {
        return Err(not_found(id));
    }
    conn.execute("DELETE FROM doctrine_fit_items WHERE fit_id = ?1", [id])
        .await?;
    insert_items(conn, id, fit.items).await
}

impl SrpDb {
    /// Create a fit and its item rows in one immediate transaction.
    pub async fn create_fit(&self, fit: &FitWrite<'_>) -> Result<ReferenceFit, DatabaseError> {
        let id = self.generate_id(PREFIX_DOCTRINE_FIT).await?;
        let now = Utc::now().to_rfc3339();

        let tx = self
            .conn()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        let written = write_new_fit(&tx, &id, &now, fit).await;
        match written {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        }

        tracing::debug!(fit_id = %id, items = fit.items.len(), "db: created doctrine fit");
        self.get_fit(&id).await
    }

    /// Overwrite a fit's scalar fields (re-activating it) and replace all of
    /// its item rows, in one immediate transaction.
    ///
    /// Concurrent replacements of the same fit serialize on the write lock;
    /// readers see either the old or the new item set, never a mix.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no fit has this ID. Nothing is
    /// written in that case.
    pub async fn replace_fit(
        &self,
        id: &str,
        fit: &FitWrite<'_>,
    ) -> Result<ReferenceFit, DatabaseError> {
        let now = Utc::now().to_rfc3339();

        let tx = self
            .conn()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        let written = overwrite_fit_rows(&tx, id, &now, fit).await;
        match written {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        }

        tracing::debug!(fit_id = id, items = fit.items.len(), "db: replaced doctrine fit");
        self.get_fit(id).await
    }

    /// One fit with its items in insertion order.
    pub async fn get_fit(&self, id: &str) -> Result<ReferenceFit, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {FIT_COLUMNS} FROM doctrine_fits WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        let mut fit = row_to_fit(&row)?;
        fit.items = self.fit_items(id).await?;
        Ok(fit)
    }

    async fn fit_items(&self, fit_id: &str) -> Result<Vec<ReferenceFitItem>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT slot, type_id, type_name, qty FROM doctrine_fit_items
                 WHERE fit_id = ?1 ORDER BY id",
                [fit_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Read fits (with items) for a query returning [`FIT_COLUMNS`].
    async fn collect_fits(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<ReferenceFit>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut fits = Vec::new();
        while let Some(row) = rows.next().await? {
            fits.push(row_to_fit(&row)?);
        }
        for fit in &mut fits {
            fit.items = self.fit_items(&fit.id).await?;
        }
        Ok(fits)
    }

    /// Fits ordered by hull name, fit title, then ID.
    pub async fn list_fits(&self, filter: FitFilter) -> Result<Vec<ReferenceFit>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(ship_type_id) = filter.ship_type_id {
            params.push(ship_type_id.into());
            conditions.push(format!("ship_type_id = ?{}", params.len()));
        }
        if !filter.include_inactive {
            conditions.push("active = 1".to_string());
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {FIT_COLUMNS} FROM doctrine_fits {where_clause} ORDER BY ship_name, name, id"
        );
        self.collect_fits(&sql, params).await
    }

    /// Active fits for one hull, ordered by fit title then ID.
    ///
    /// This order is the scoring tie-break: among equal scores the first
    /// fit in this order wins.
    pub async fn active_fits_for_hull(
        &self,
        ship_type_id: TypeId,
    ) -> Result<Vec<ReferenceFit>, DatabaseError> {
        let sql = format!(
            "SELECT {FIT_COLUMNS} FROM doctrine_fits
             WHERE ship_type_id = ?1 AND active = 1 ORDER BY name, id"
        );
        self.collect_fits(&sql, vec![ship_type_id.into()]).await
    }

    /// Latest `updated_at` among active fits for a hull.
    ///
    /// Compared as parsed timestamps, so rows written in either datetime
    /// format order correctly.
    pub async fn newest_active_fit_update(
        &self,
        ship_type_id: TypeId,
    ) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT updated_at FROM doctrine_fits WHERE ship_type_id = ?1 AND active = 1",
                [ship_type_id],
            )
            .await?;
        let mut newest: Option<DateTime<Utc>> = None;
        while let Some(row) = rows.next().await? {
            let ts = parse_datetime(&row.get::<String>(0)?)?;
            newest = Some(newest.map_or(ts, |n| n.max(ts)));
        }
        Ok(newest)
    }

    /// Activate or deactivate a fit. Bumps `updated_at`.
    pub async fn set_fit_active(
        &self,
        id: &str,
        active: bool,
        updated_by: Option<&str>,
    ) -> Result<ReferenceFit, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let updated = self
            .conn()
            .execute(
                "UPDATE doctrine_fits SET active = ?1, updated_by = COALESCE(?2, updated_by), updated_at = ?3
                 WHERE id = ?4",
                libsql::params![i64::from(active), updated_by, now.as_str(), id],
            )
            .await?;
        if updated == 0 {
            return Err(not_found(id));
        }
        self.get_fit(id).await
    }

    /// Delete a fit. Item rows cascade; claims referencing it keep their
    /// cached payload with the fit reference cleared.
    pub async fn delete_fit(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .conn()
            .execute("DELETE FROM doctrine_fits WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
