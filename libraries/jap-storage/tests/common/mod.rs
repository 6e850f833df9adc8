//! Test helpers for storage integration tests
//!
//! These helpers use REAL SQLite files (NOT in-memory) so that WAL mode,
//! the pool's multiple connections and the schema constraints all behave
//! as they do in production.

use chrono::NaiveDate;
use jap_core::types::Profile;
use jap_storage::SqliteStorage;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = jap_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        jap_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Storage adapter over this database
    pub fn storage(&self) -> SqliteStorage {
        SqliteStorage::new(self.pool.clone())
    }
}

/// Test fixture: a complete profile
pub fn profile(name: &str, mobile: &str, location: &str) -> Profile {
    Profile {
        name: name.to_string(),
        mobile: mobile.to_string(),
        location: location.to_string(),
        dob: NaiveDate::from_ymd_opt(1990, 8, 15).unwrap(),
    }
}
