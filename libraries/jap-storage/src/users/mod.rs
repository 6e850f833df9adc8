//! User lookup and creation queries

use crate::error::{Result, StorageError};
use chrono::{DateTime, NaiveDate};
use jap_core::types::{Profile, User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, name, mobile, location, dob, created_at";

/// Find a user by exact name, mobile and location
pub async fn find_by_profile(
    pool: &SqlitePool,
    name: &str,
    mobile: &str,
    location: &str,
) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE name = ? AND mobile = ? AND location = ?
         ORDER BY created_at, rowid LIMIT 1"
    ))
    .bind(name)
    .bind(mobile)
    .bind(location)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Find the earliest user registered with `mobile`
pub async fn find_by_mobile(pool: &SqlitePool, mobile: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE mobile = ? ORDER BY created_at, rowid LIMIT 1"
    ))
    .bind(mobile)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Insert a new user built from a full profile
pub async fn create(pool: &SqlitePool, profile: &Profile) -> Result<User> {
    let user = User::from_profile(profile);
    let dob = user.dob.map(|d| d.format("%Y-%m-%d").to_string());

    sqlx::query(
        "INSERT INTO users (id, name, mobile, location, dob, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.mobile)
    .bind(&user.location)
    .bind(dob)
    .bind(user.created_at.timestamp())
    .execute(pool)
    .await?;

    Ok(user)
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, rowid"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> Result<User> {
    let dob = row
        .try_get::<Option<String>, _>("dob")?
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| StorageError::corrupt("users", format!("dob: {e}")))?;

    let created_at = DateTime::from_timestamp(row.try_get::<i64, _>("created_at")?, 0)
        .ok_or_else(|| StorageError::corrupt("users", "created_at out of range"))?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        mobile: row.try_get("mobile")?,
        location: row.try_get("location")?,
        dob,
        created_at,
    })
}
