//! Daily entry queries
//!
//! Dates are bound as `YYYY-MM-DD` text, so equality is calendar-day
//! equality and window counts are plain range comparisons.

use crate::error::{Result, StorageError};
use jap_core::types::{DateWindow, EntryDate, InsertOutcome, NewEntry, UserId};
use sqlx::SqlitePool;

/// Check whether `user_id` already has an entry on `date`
pub async fn exists(pool: &SqlitePool, user_id: &UserId, date: EntryDate) -> Result<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM entries WHERE user_id = ? AND entry_date = ? LIMIT 1")
            .bind(user_id)
            .bind(date.to_string())
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

/// Insert an entry unless one already exists for the same user and day
///
/// The conflict is resolved by the `UNIQUE(user_id, entry_date)` constraint
/// inside a single statement, so there is no window between check and write.
pub async fn insert(pool: &SqlitePool, new_entry: NewEntry) -> Result<InsertOutcome> {
    let entry = new_entry.into_entry();

    let result = sqlx::query(
        "INSERT INTO entries (id, user_id, entry_date, quantity, created_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(user_id, entry_date) DO NOTHING",
    )
    .bind(&entry.id)
    .bind(&entry.user_id)
    .bind(entry.date.to_string())
    .bind(entry.quantity.get())
    .bind(entry.created_at.timestamp())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(InsertOutcome::AlreadyExists);
    }

    Ok(InsertOutcome::Inserted(entry))
}

/// Count entries for `user_id` inside `window`, bounds inclusive
pub async fn count_in_window(
    pool: &SqlitePool,
    user_id: &UserId,
    window: DateWindow,
) -> Result<u64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM entries
         WHERE user_id = ? AND entry_date >= ? AND entry_date <= ?",
    )
    .bind(user_id)
    .bind(window.start.to_string())
    .bind(window.last.to_string())
    .fetch_one(pool)
    .await?;

    u64::try_from(count).map_err(|_| StorageError::corrupt("entries", "negative count"))
}
