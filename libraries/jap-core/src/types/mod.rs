/// Domain types
pub mod date;
pub mod entry;
pub mod ids;
pub mod user;

pub use date::{DateWindow, EntryDate};
pub use entry::{Entry, InsertOutcome, JapCounts, NewEntry, Quantity};
pub use ids::{EntryId, UserId};
pub use user::{Identity, Profile, User};
