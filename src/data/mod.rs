//! Database repository layer.
//!
//! The engines only see the `ProfileStore` and `TicketStore` traits. The repositories in
//! this module implement them on top of SeaORM, returning domain models so entity types
//! never leak into the service layer. Both stores expose compare-and-set transitions so
//! concurrent requests for the same member are settled by the database rather than by
//! in-process locks.

pub mod profile;
pub mod ticket;


use async_trait::async_trait;
use sea_orm::SqlErr;

use crate::{
    error::AppError,
    model::{
        profile::{CreateProfileParam, Profile, UpdateProfileParam},
        ticket::{CreateTicketParam, Ticket, UpdateTicketParam},
    },
};

pub use profile::ProfileRepository;
pub use ticket::TicketRepository;

/// Persistence for student profiles keyed by member id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_by_id(&self, id: u64) -> Result<Option<Profile>, AppError>;

    /// Inserts a new pending profile. Fails with a unique violation if one exists.
    async fn create(&self, param: CreateProfileParam) -> Result<Profile, AppError>;

    /// Applies a partial update, returning `None` when no profile exists.
    ///
    /// A profile that is verified after the update never keeps a pending code.
    async fn update(&self, id: u64, param: UpdateProfileParam)
        -> Result<Option<Profile>, AppError>;

    /// Overwrites username, email and code of a profile that is not yet verified.
    ///
    /// Returns `false` when the profile is missing or already verified, so a fresh code
    /// is never attached to a verified profile.
    async fn reissue_code(&self, param: CreateProfileParam) -> Result<bool, AppError>;

    /// Finds a profile holding `email`, preferring a verified one.
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;

    /// Marks the profile verified and clears its code, only if `code` is still pending.
    ///
    /// Returns `false` when the profile is missing, already verified, or holds a
    /// different code.
    async fn consume_code(&self, id: u64, code: i32) -> Result<bool, AppError>;
}

/// Persistence for tickets keyed by channel id.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn get_by_id(&self, channel_id: u64) -> Result<Option<Ticket>, AppError>;

    /// Inserts an open ticket. Fails with a unique violation if the owner already has one.
    async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError>;

    /// Applies a partial update to an open ticket, returning `None` when no ticket exists.
    ///
    /// Fails with `TicketAlreadyClosed` for a closed ticket, whose status and transcript
    /// are final.
    async fn update(
        &self,
        channel_id: u64,
        param: UpdateTicketParam,
    ) -> Result<Option<Ticket>, AppError>;

    async fn find_open_by_owner(&self, owner_id: u64) -> Result<Vec<Ticket>, AppError>;

    /// Closes the ticket and stores its transcript, only if it is still open.
    async fn close_if_open(&self, channel_id: u64, content: String) -> Result<bool, AppError>;
}

/// Whether the error is a database unique constraint violation.
pub fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::DbErr(db_err) => matches!(
            db_err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ),
        _ => false,
    }
}
