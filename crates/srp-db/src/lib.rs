//! # srp-db
//!
//! libSQL storage for the SRP fit checker.
//!
//! Holds doctrine fits with their item rows, the type-name and
//! corporation/alliance name caches, and claims with their cached fit-check
//! result. Repository methods live in [`repos`] as `impl SrpDb` blocks.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
#[cfg(test)]
pub(crate) mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. All repository methods
/// run on that connection.
pub struct SrpDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

/// Write-lock wait used by [`SrpDb::open_local`].
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl SrpDb {
    /// Open a local database at the given path. `:memory:` opens a
    /// throwaway in-memory database.
    ///
    /// Runs migrations automatically on open. Writers wait up to
    /// [`DEFAULT_BUSY_TIMEOUT`] for another connection's write lock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_timeout(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Like [`SrpDb::open_local`], with an explicit busy timeout.
    ///
    /// Several handles may share one file. An immediate transaction on one
    /// of them (fit create/overwrite) makes writers on the others block for
    /// up to `busy_timeout` instead of failing with "database is locked".
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection settings
        conn.busy_timeout(busy_timeout)?;
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let srp_db = Self { db, conn };
        srp_db.run_migrations().await?;
        tracing::debug!(path, busy_timeout_ms = busy_timeout.as_millis(), "db: opened");
        Ok(srp_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dft-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
