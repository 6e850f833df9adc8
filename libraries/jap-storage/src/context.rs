//! `Storage` port implementation backed by a `SQLite` pool

use crate::{entries, users};
use async_trait::async_trait;
use jap_core::types::{DateWindow, EntryDate, InsertOutcome, NewEntry, Profile, User, UserId};
use jap_core::{Result, Storage};
use sqlx::SqlitePool;

/// `SQLite`-backed storage shared by every request handler
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn find_user_by_profile(
        &self,
        name: &str,
        mobile: &str,
        location: &str,
    ) -> Result<Option<User>> {
        Ok(users::find_by_profile(&self.pool, name, mobile, location).await?)
    }

    async fn find_user_by_mobile(&self, mobile: &str) -> Result<Option<User>> {
        Ok(users::find_by_mobile(&self.pool, mobile).await?)
    }

    async fn create_user(&self, profile: &Profile) -> Result<User> {
        Ok(users::create(&self.pool, profile).await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    async fn entry_exists(&self, user_id: &UserId, date: EntryDate) -> Result<bool> {
        Ok(entries::exists(&self.pool, user_id, date).await?)
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<InsertOutcome> {
        Ok(entries::insert(&self.pool, entry).await?)
    }

    async fn count_entries(&self, user_id: &UserId, window: DateWindow) -> Result<u64> {
        Ok(entries::count_in_window(&self.pool, user_id, window).await?)
    }
}
