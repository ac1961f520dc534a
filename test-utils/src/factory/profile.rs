//! Profile factory for creating test student profiles.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test profiles with customizable fields.
///
/// Defaults describe a member with a pending code who has not verified yet.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::profile::ProfileFactory;
///
/// let profile = ProfileFactory::new(&db)
///     .id("123456789")
///     .email("pete@purdue.edu")
///     .code(482913)
///     .build()
///     .await?;
/// ```
pub struct ProfileFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    username: String,
    email: String,
    code: i32,
    status: bool,
}

impl<'a> ProfileFactory<'a> {
    /// Creates a new ProfileFactory with default values.
    ///
    /// Defaults:
    /// - id: auto-incremented snowflake-like value
    /// - username: `"member{id}"`
    /// - email: `"member{id}@purdue.edu"`
    /// - code: `123456`
    /// - status: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: id.to_string(),
            username: format!("member{}", id),
            email: format!("member{}@purdue.edu", id),
            code: 123456,
            status: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    /// Marks the profile as verified, clearing the pending code.
    pub fn verified(mut self) -> Self {
        self.status = true;
        self.code = 0;
        self
    }

    /// Builds and inserts the profile entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::profile::Model)` - Created profile entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::profile::Model, DbErr> {
        let now = Utc::now();
        entity::profile::ActiveModel {
            id: ActiveValue::Set(self.id),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            code: ActiveValue::Set(self.code),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            verified_at: ActiveValue::Set(self.status.then_some(now)),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending profile with default values.
pub async fn create_profile(db: &DatabaseConnection) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).build().await
}

/// Creates a verified profile for the given member id.
pub async fn create_verified_profile(
    db: &DatabaseConnection,
    id: impl Into<String>,
) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).id(id).verified().build().await
}
