//! Profile repository for database operations.
//!
//! This module provides the `ProfileRepository` for managing student profile records.
//! All methods return domain models at the repository boundary, converting SeaORM
//! entity models internally.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{
    data::ProfileStore,
    error::AppError,
    model::profile::{CreateProfileParam, Profile, UpdateProfileParam, NO_PENDING_CODE},
};

/// Repository providing database operations for student profiles.
pub struct ProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileRepository<'a> {
    /// Creates a new ProfileRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ProfileRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> ProfileStore for ProfileRepository<'a> {
    /// Finds a profile by the member's Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - Profile found
    /// - `Ok(None)` - Member never started verification
    /// - `Err(AppError)` - Database error or corrupt stored id
    async fn get_by_id(&self, id: u64) -> Result<Option<Profile>, AppError> {
        let entity = entity::prelude::Profile::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        entity.map(Profile::from_entity).transpose()
    }

    /// Creates a pending profile.
    ///
    /// The email is stored lower-cased so lookups by address are exact.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The created profile
    /// - `Err(AppError::DbErr)` - Database error, including a unique violation when a
    ///   profile already exists for the member
    async fn create(&self, param: CreateProfileParam) -> Result<Profile, AppError> {
        let entity = entity::profile::ActiveModel {
            id: ActiveValue::Set(param.id.to_string()),
            username: ActiveValue::Set(param.username),
            email: ActiveValue::Set(param.email.to_lowercase()),
            code: ActiveValue::Set(param.code),
            status: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            verified_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Profile::from_entity(entity)
    }

    /// Applies the provided fields to an existing profile.
    ///
    /// Setting `status` to `true` also stamps `verified_at`. A verified profile always ends
    /// up with `NO_PENDING_CODE`, whatever `code` was passed.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - The updated profile
    /// - `Ok(None)` - No profile exists for the member
    /// - `Err(AppError)` - Database error during update
    async fn update(
        &self,
        id: u64,
        param: UpdateProfileParam,
    ) -> Result<Option<Profile>, AppError> {
        let Some(entity) = entity::prelude::Profile::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let verified = param.status.unwrap_or(entity.status);
        let mut active = entity.into_active_model();

        if let Some(username) = param.username {
            active.username = ActiveValue::Set(username);
        }
        if let Some(email) = param.email {
            active.email = ActiveValue::Set(email.to_lowercase());
        }
        if let Some(status) = param.status {
            active.status = ActiveValue::Set(status);
            active.verified_at = ActiveValue::Set(status.then(Utc::now));
        }

        if verified {
            active.code = ActiveValue::Set(NO_PENDING_CODE);
        } else if let Some(code) = param.code {
            active.code = ActiveValue::Set(code);
        }

        let entity = active.update(self.db).await?;

        Profile::from_entity(entity).map(Some)
    }

    /// Replaces the pending code of an unverified profile.
    ///
    /// Runs as a single conditional UPDATE filtered on `status = false`, leaving the
    /// verification status untouched.
    ///
    /// # Returns
    /// - `Ok(true)` - Email and code overwritten
    /// - `Ok(false)` - No unverified profile exists for the member
    /// - `Err(AppError)` - Database error during update
    async fn reissue_code(&self, param: CreateProfileParam) -> Result<bool, AppError> {
        let result = entity::prelude::Profile::update_many()
            .col_expr(entity::profile::Column::Username, Expr::value(param.username))
            .col_expr(
                entity::profile::Column::Email,
                Expr::value(param.email.to_lowercase()),
            )
            .col_expr(entity::profile::Column::Code, Expr::value(param.code))
            .filter(entity::profile::Column::Id.eq(param.id.to_string()))
            .filter(entity::profile::Column::Status.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Finds a profile by email address.
    ///
    /// Several pending profiles may carry the same address; a verified holder is
    /// returned ahead of them.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - A profile holds the address
    /// - `Ok(None)` - No profile holds the address
    /// - `Err(AppError)` - Database error during query
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let entity = entity::prelude::Profile::find()
            .filter(entity::profile::Column::Email.eq(email.to_lowercase()))
            .order_by_desc(entity::profile::Column::Status)
            .one(self.db)
            .await?;

        entity.map(Profile::from_entity).transpose()
    }

    /// Flips a pending profile to verified if `code` still matches.
    ///
    /// Runs as a single conditional UPDATE so two concurrent confirmations of the same
    /// code cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - Profile verified and code cleared
    /// - `Ok(false)` - No pending profile with that code
    /// - `Err(AppError)` - Database error during update
    async fn consume_code(&self, id: u64, code: i32) -> Result<bool, AppError> {
        if code == NO_PENDING_CODE {
            return Ok(false);
        }

        let result = entity::prelude::Profile::update_many()
            .col_expr(entity::profile::Column::Status, Expr::value(true))
            .col_expr(entity::profile::Column::Code, Expr::value(NO_PENDING_CODE))
            .col_expr(entity::profile::Column::VerifiedAt, Expr::value(Utc::now()))
            .filter(entity::profile::Column::Id.eq(id.to_string()))
            .filter(entity::profile::Column::Status.eq(false))
            .filter(entity::profile::Column::Code.eq(code))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
