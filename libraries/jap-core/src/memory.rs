//! In-memory `Storage` adapter
//!
//! Keeps the same uniqueness guarantees as the SQLite schema so domain
//! services can be exercised without a database.

use crate::error::{JapError, Result};
use crate::traits::Storage;
use crate::types::{
    DateWindow, Entry, EntryDate, InsertOutcome, NewEntry, Profile, User, UserId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    entries: HashMap<(UserId, EntryDate), Entry>,
}

/// Thread-safe in-memory store
#[derive(Default)]
pub struct InMemoryStorage {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    /// Number of stored entries across all users
    pub async fn entry_count(&self) -> usize {
        self.tables.lock().await.entries.len()
    }

    /// Store an entry directly, bypassing the ledger
    pub async fn seed_entry(&self, entry: NewEntry) -> Result<InsertOutcome> {
        self.insert_entry(entry).await
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(JapError::storage("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn find_user_by_profile(
        &self,
        name: &str,
        mobile: &str,
        location: &str,
    ) -> Result<Option<User>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.name == name && u.mobile == mobile && u.location == location)
            .cloned())
    }

    async fn find_user_by_mobile(&self, mobile: &str) -> Result<Option<User>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.mobile == mobile).cloned())
    }

    async fn create_user(&self, profile: &Profile) -> Result<User> {
        self.check_available()?;
        let user = User::from_profile(profile);
        self.tables.lock().await.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check_available()?;
        Ok(self.tables.lock().await.users.clone())
    }

    async fn entry_exists(&self, user_id: &UserId, date: EntryDate) -> Result<bool> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.entries.contains_key(&(user_id.clone(), date)))
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<InsertOutcome> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let key = (entry.user_id.clone(), entry.date);
        if tables.entries.contains_key(&key) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let entry = entry.into_entry();
        tables.entries.insert(key, entry.clone());
        Ok(InsertOutcome::Inserted(entry))
    }

    async fn count_entries(&self, user_id: &UserId, window: DateWindow) -> Result<u64> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let count = tables
            .entries
            .values()
            .filter(|e| &e.user_id == user_id && window.contains(e.date))
            .count();
        Ok(count as u64)
    }
}
