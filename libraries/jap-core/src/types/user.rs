/// User and identity types
use crate::error::{JapError, Result};
use crate::types::{EntryDate, UserId};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A person recording jap counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Mobile number, also used as a lookup key
    pub mobile: String,

    /// Free-form location
    pub location: String,

    /// Date of birth (display only, not part of any match key)
    pub dob: Option<NaiveDate>,

    /// Row creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user from a full profile
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            id: UserId::generate(),
            name: profile.name.clone(),
            mobile: profile.mobile.clone(),
            location: profile.location.clone(),
            dob: Some(profile.dob),
            // Stored with second precision
            created_at: Utc::now().trunc_subsecs(0),
        }
    }
}

/// All four identifying fields, as submitted on first sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub mobile: String,
    pub location: String,
    pub dob: NaiveDate,
}

/// The two accepted shapes of identifying input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Name, mobile, location and date of birth
    Full(Profile),
    /// Mobile number alone, for returning users
    MobileOnly(String),
}

impl Identity {
    /// Classify raw, optional fields into an identity shape
    ///
    /// Blank strings count as absent. Anything other than "mobile alone"
    /// or "all four fields" is rejected.
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete input or a malformed `dob`
    pub fn from_parts(
        name: Option<&str>,
        mobile: Option<&str>,
        location: Option<&str>,
        dob: Option<&str>,
    ) -> Result<Self> {
        fn present(field: Option<&str>) -> Option<&str> {
            field.map(str::trim).filter(|s| !s.is_empty())
        }

        match (present(name), present(mobile), present(location), present(dob)) {
            (None, Some(mobile), None, None) => Ok(Self::MobileOnly(mobile.to_string())),
            (Some(name), Some(mobile), Some(location), Some(dob)) => {
                let dob = EntryDate::parse(dob)
                    .map_err(|_| JapError::validation("Invalid date of birth. Use YYYY-MM-DD."))?;
                Ok(Self::Full(Profile {
                    name: name.to_string(),
                    mobile: mobile.to_string(),
                    location: location.to_string(),
                    dob: dob.as_naive(),
                }))
            }
            _ => Err(JapError::validation("All fields are required")),
        }
    }

    /// The mobile number carried by either shape
    pub fn mobile(&self) -> &str {
        match self {
            Self::Full(profile) => &profile.mobile,
            Self::MobileOnly(mobile) => mobile,
        }
    }
}
