//! Jap Tracker Core
//!
//! Domain types, services and the storage port for recording a daily
//! jap count per person and reporting day/month/year totals.
//!
//! # Architecture
//!
//! - **Types**: `User`, `Entry`, `EntryDate`, `Quantity`, `Identity`
//! - **Port**: the async `Storage` trait, implemented by `jap-storage`
//!   (SQLite) and by [`memory::InMemoryStorage`]
//! - **Services**: [`IdentityResolver`], [`SubmissionLedger`], [`Aggregator`]
//!
//! Services receive their store at construction; nothing is global.
//!
//! # Example
//!
//! ```rust
//! use jap_core::{memory::InMemoryStorage, EntryDate, Identity, IdentityResolver, Quantity,
//!     SubmissionLedger};
//! use std::sync::Arc;
//!
//! # async fn example() -> jap_core::Result<()> {
//! let storage = Arc::new(InMemoryStorage::new());
//! let resolver = IdentityResolver::new(storage.clone());
//! let ledger = SubmissionLedger::new(storage);
//!
//! let identity = Identity::from_parts(
//!     Some("Radha"), Some("9876543210"), Some("Vrindavan"), Some("1990-08-15"))?;
//! let user = resolver.resolve(&identity).await?.into_user();
//!
//! let submission = ledger
//!     .submit(&user.id, EntryDate::parse("2024-01-05")?, Quantity::new(16)?)
//!     .await?;
//! assert_eq!(submission.total_today, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod aggregator;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod memory;
pub mod traits;
pub mod types;

pub use aggregator::Aggregator;
pub use error::{JapError, Result};
pub use identity::{IdentityResolver, Resolution};
pub use ledger::{Submission, SubmissionLedger};
pub use traits::Storage;
pub use types::{
    DateWindow, Entry, EntryDate, EntryId, Identity, InsertOutcome, JapCounts, NewEntry, Profile,
    Quantity, User, UserId,
};
