/// Core error types for the jap tracker
use crate::types::{EntryDate, UserId};
use thiserror::Error;

/// Result type alias using `JapError`
pub type Result<T> = std::result::Result<T, JapError>;

/// Core error type shared by the domain services and storage adapters
#[derive(Error, Debug)]
pub enum JapError {
    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// No user matched a mobile-only lookup
    #[error("User not found")]
    UserNotFound,

    /// A user id that should exist does not
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    /// An entry already exists for this user and calendar day
    #[error("Entry already exists for user {user_id} on {date}")]
    DuplicateSubmission {
        /// Owner of the existing entry
        user_id: UserId,
        /// Day that is already taken
        date: EntryDate,
    },

    /// Lower-layer storage failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl JapError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True when the failure was caused by caller input rather than the system
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for JapError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
