//! Jap Tracker Storage
//!
//! `SQLite` persistence for users and daily entries.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: `users` and `entries` each own their queries
//! - **Port Adapter**: [`SqliteStorage`] implements `jap_core::Storage`
//! - **Uniqueness in the schema**: `UNIQUE(user_id, entry_date)` on `entries`
//!   makes the once-per-day rule hold across processes
//!
//! # Example
//!
//! ```rust,no_run
//! use jap_storage::{create_pool, run_migrations, SqliteStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://japmala.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = SqliteStorage::new(pool);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod entries;
pub mod users;

pub use context::SqliteStorage;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://japmala.db>`)
///
/// # Errors
///
/// Returns an error if the database directory cannot be created or the
/// connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
