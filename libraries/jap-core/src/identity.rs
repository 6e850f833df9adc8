//! Identity resolution: map submitted fields to a user row

use crate::error::{JapError, Result};
use crate::traits::Storage;
use crate::types::{Identity, User};
use std::sync::Arc;

/// How a resolution was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing row matched
    Existing(User),
    /// A new row was created from a full profile
    Created(User),
}

impl Resolution {
    pub fn user(&self) -> &User {
        match self {
            Self::Existing(user) | Self::Created(user) => user,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            Self::Existing(user) | Self::Created(user) => user,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Finds or creates users without ever duplicating a full-profile match
#[derive(Clone)]
pub struct IdentityResolver {
    storage: Arc<dyn Storage>,
}

impl IdentityResolver {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Resolve an identity to a user
    ///
    /// A full profile matches on name, mobile and location and creates a row
    /// only when nothing matches. A mobile-only identity never creates rows.
    ///
    /// # Errors
    ///
    /// `UserNotFound` for an unknown mobile, `Storage` for backend failures
    pub async fn resolve(&self, identity: &Identity) -> Result<Resolution> {
        match identity {
            Identity::MobileOnly(mobile) => {
                let user = self
                    .storage
                    .find_user_by_mobile(mobile)
                    .await?
                    .ok_or(JapError::UserNotFound)?;
                tracing::debug!(user_id = %user.id, "Resolved user by mobile");
                Ok(Resolution::Existing(user))
            }
            Identity::Full(profile) => {
                if let Some(user) = self
                    .storage
                    .find_user_by_profile(&profile.name, &profile.mobile, &profile.location)
                    .await?
                {
                    tracing::debug!(user_id = %user.id, "Resolved user by profile");
                    return Ok(Resolution::Existing(user));
                }

                let user = self.storage.create_user(profile).await?;
                tracing::info!(user_id = %user.id, "Created user");
                Ok(Resolution::Created(user))
            }
        }
    }
}
