//! Submission ledger: at most one entry per user per calendar day

use crate::error::{JapError, Result};
use crate::traits::Storage;
use crate::types::{DateWindow, Entry, EntryDate, InsertOutcome, NewEntry, Quantity, UserId};
use std::sync::Arc;

/// A stored entry together with the day's entry count after insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub entry: Entry,
    pub total_today: u64,
}

/// Append-only log of daily entries
#[derive(Clone)]
pub struct SubmissionLedger {
    storage: Arc<dyn Storage>,
}

impl SubmissionLedger {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// True iff an entry already exists for `(user_id, date)`
    pub async fn check_exists(&self, user_id: &UserId, date: EntryDate) -> Result<bool> {
        self.storage.entry_exists(user_id, date).await
    }

    /// Record `quantity` for `date`
    ///
    /// The pre-check only short-circuits the common case. The storage-level
    /// insert-if-absent is what actually guarantees uniqueness when two
    /// submissions race.
    ///
    /// # Errors
    ///
    /// `DuplicateSubmission` if the day is already taken, `Storage` otherwise
    pub async fn submit(
        &self,
        user_id: &UserId,
        date: EntryDate,
        quantity: Quantity,
    ) -> Result<Submission> {
        let duplicate = || JapError::DuplicateSubmission {
            user_id: user_id.clone(),
            date,
        };

        if self.check_exists(user_id, date).await? {
            tracing::warn!(user_id = %user_id, %date, "Rejected repeat submission");
            return Err(duplicate());
        }

        let new_entry = NewEntry {
            user_id: user_id.clone(),
            date,
            quantity,
        };

        let entry = match self.storage.insert_entry(new_entry).await? {
            InsertOutcome::Inserted(entry) => entry,
            InsertOutcome::AlreadyExists => {
                tracing::warn!(user_id = %user_id, %date, "Lost submission race");
                return Err(duplicate());
            }
        };

        let total_today = self
            .storage
            .count_entries(user_id, DateWindow::day(date))
            .await?;

        tracing::info!(user_id = %user_id, %date, quantity = %quantity, "Recorded entry");

        Ok(Submission { entry, total_today })
    }
}
