/// Daily jap entries and their aggregates
use crate::error::{JapError, Result};
use crate::types::{EntryDate, EntryId, UserId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of repetitions recorded for one day
///
/// Zero is treated as "no quantity". No other range is imposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Wrap a raw count
    ///
    /// # Errors
    ///
    /// Returns a validation error for zero
    pub fn new(value: i64) -> Result<Self> {
        if value == 0 {
            return Err(JapError::validation("Quantity is required"));
        }
        Ok(Self(value))
    }

    /// Parse a count sent as text
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank, non-integer or zero input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(JapError::validation("Quantity is required"));
        }
        let value = input
            .parse::<i64>()
            .map_err(|_| JapError::validation("Quantity must be a whole number"))?;
        Self::new(value)
    }

    /// Raw count
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded day for one user; immutable once stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub user_id: UserId,
    pub date: EntryDate,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

/// Entry awaiting insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub user_id: UserId,
    pub date: EntryDate,
    pub quantity: Quantity,
}

impl NewEntry {
    /// Assign an id and creation time
    pub fn into_entry(self) -> Entry {
        Entry {
            id: EntryId::generate(),
            user_id: self.user_id,
            date: self.date,
            quantity: self.quantity,
            created_at: Utc::now().trunc_subsecs(0),
        }
    }
}

/// Result of an atomic insert-if-absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry was stored
    Inserted(Entry),
    /// Another entry already holds this (user, date) slot
    AlreadyExists,
}

/// Entry counts for the day, month and year around a reference date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapCounts {
    pub daily: u64,
    pub monthly: u64,
    pub yearly: u64,
}
