//! Student profile domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Marker stored in `Profile::code` when no one-time code is pending.
pub const NO_PENDING_CODE: i32 = 0;

/// A member's verification state and last submitted email.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Discord ID of the member.
    pub id: u64,
    /// Display name at last write, informational only.
    pub username: String,
    /// Last submitted address, lower-cased.
    pub email: String,
    /// Pending one-time code or `NO_PENDING_CODE`.
    pub code: i32,
    /// Whether verification has completed.
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Converts an entity model to a profile domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The converted profile
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored member id is not a snowflake
    pub fn from_entity(entity: entity::profile::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_u64_from_string(entity.id)?,
            username: entity.username,
            email: entity.email,
            code: entity.code,
            status: entity.status,
            created_at: entity.created_at,
            verified_at: entity.verified_at,
        })
    }

    /// Whether a one-time code is waiting to be confirmed.
    pub fn has_pending_code(&self) -> bool {
        !self.status && self.code != NO_PENDING_CODE
    }
}

/// Parameters for creating a profile on a member's first verification attempt.
#[derive(Debug, Clone)]
pub struct CreateProfileParam {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub code: i32,
}

/// Partial update of a profile; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub username: Option<String>,
    pub email: Option<String>,
    pub code: Option<i32>,
    pub status: Option<bool>,
}

/// Result of a successful `start` call.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSent {
    /// Address the code was delivered to.
    pub email: String,
}

/// Result of a successful `complete` call.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationCompleted {
    /// Whether the affiliation role was applied. The profile is verified either way.
    pub role_granted: bool,
}
