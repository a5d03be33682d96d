//! Shared fixtures for srp-db unit tests.

use std::time::Duration;

use tempfile::TempDir;

use crate::SrpDb;

/// In-memory database with migrations applied.
pub async fn test_db() -> SrpDb {
    SrpDb::open_local(":memory:").await.unwrap()
}

/// Two independent handles on one database file, each with `busy_timeout`.
///
/// Keep the returned `TempDir` alive for as long as the handles are used.
pub async fn shared_file_dbs(busy_timeout: Duration) -> (TempDir, SrpDb, SrpDb) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let path = path.to_str().unwrap();
    let first = SrpDb::open_local_with_timeout(path, busy_timeout).await.unwrap();
    let second = SrpDb::open_local_with_timeout(path, busy_timeout).await.unwrap();
    (dir, first, second)
}
