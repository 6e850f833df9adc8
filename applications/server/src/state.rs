/// Shared application state
use crate::services::AuthService;
use jap_core::{Aggregator, IdentityResolver, Storage, SubmissionLedger};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub auth_service: Arc<AuthService>,
    pub identity: IdentityResolver,
    pub ledger: SubmissionLedger,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, auth_service: Arc<AuthService>) -> Self {
        Self {
            identity: IdentityResolver::new(Arc::clone(&storage)),
            ledger: SubmissionLedger::new(Arc::clone(&storage)),
            aggregator: Aggregator::new(Arc::clone(&storage)),
            storage,
            auth_service,
        }
    }
}
