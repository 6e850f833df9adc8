//! Storage port shared by the SQLite adapter and the in-memory adapter

use crate::error::Result;
use crate::types::{DateWindow, EntryDate, InsertOutcome, NewEntry, Profile, User, UserId};
use async_trait::async_trait;

/// Persistent store for users and entries
///
/// Implementations must not cache lookups across calls: every method is a
/// fresh round-trip to the backing store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Exact match on name, mobile and location (dob is not part of the key)
    async fn find_user_by_profile(
        &self,
        name: &str,
        mobile: &str,
        location: &str,
    ) -> Result<Option<User>>;

    /// First user registered with this mobile number
    async fn find_user_by_mobile(&self, mobile: &str) -> Result<Option<User>>;

    /// Insert a new user row
    async fn create_user(&self, profile: &Profile) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// All users, oldest first
    async fn list_users(&self) -> Result<Vec<User>>;

    /// True if an entry exists for this user on this day
    async fn entry_exists(&self, user_id: &UserId, date: EntryDate) -> Result<bool>;

    /// Atomically insert unless an entry already exists for `(user_id, date)`
    async fn insert_entry(&self, entry: NewEntry) -> Result<InsertOutcome>;

    /// Number of entries for this user with a date inside `window`
    async fn count_entries(&self, user_id: &UserId, window: DateWindow) -> Result<u64>;
}
