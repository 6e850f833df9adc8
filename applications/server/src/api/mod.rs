/// API route modules
pub mod health;
pub mod jap;
pub mod users;
