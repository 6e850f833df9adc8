//! Day, month and year entry counts

use crate::error::Result;
use crate::traits::Storage;
use crate::types::{DateWindow, EntryDate, JapCounts, UserId};
use std::sync::Arc;

#[derive(Clone)]
pub struct Aggregator {
    storage: Arc<dyn Storage>,
}

impl Aggregator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Counts anchored on today's date in the local timezone of this process
    pub async fn counts(&self, user_id: &UserId) -> Result<JapCounts> {
        self.counts_at(user_id, EntryDate::today()).await
    }

    /// Counts anchored on an explicit reference date
    pub async fn counts_at(&self, user_id: &UserId, reference: EntryDate) -> Result<JapCounts> {
        let daily = self
            .storage
            .count_entries(user_id, DateWindow::day(reference))
            .await?;
        let monthly = self
            .storage
            .count_entries(user_id, DateWindow::month(reference))
            .await?;
        let yearly = self
            .storage
            .count_entries(user_id, DateWindow::year(reference))
            .await?;

        Ok(JapCounts {
            daily,
            monthly,
            yearly,
        })
    }
}
