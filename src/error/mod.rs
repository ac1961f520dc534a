//! Error types and interaction reply mapping.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and knows how to present
//! itself to a guild member through `user_message()`, the way an HTTP backend would map
//! errors onto response bodies.

pub mod config;
pub mod email;
pub mod internal;
pub mod ticket;
pub mod verification;

use dioxus_logger::tracing;
use thiserror::Error;

use crate::error::{
    config::ConfigError, email::EmailError, internal::InternalError, ticket::TicketError,
    verification::VerificationError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Domain errors
/// (`VerificationError`, `TicketError`) are expected outcomes and carry their own member
/// facing messages, while collaborator failures get a generic message and are logged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Email verification flow rejected the request.
    #[error(transparent)]
    VerificationErr(#[from] VerificationError),

    /// Ticket lifecycle rejected the request.
    #[error(transparent)]
    TicketErr(#[from] TicketError),

    /// Mail transport setup or delivery error outside the verification flow.
    #[error(transparent)]
    EmailErr(#[from] EmailError),

    /// Internal issue indicating unexpected data or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// A role, channel, or message operation against the guild failed.
    ///
    /// # Fields
    /// - Description of the failed operation
    #[error("Guild directory operation failed: {0}")]
    DirectoryUnavailable(String),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Short human-readable reason suitable for an ephemeral interaction reply.
    ///
    /// Validation outcomes are returned verbatim. Collaborator and internal failures are
    /// logged with full detail and replaced with a generic message to avoid leaking
    /// implementation details to members.
    ///
    /// # Returns
    /// - `String` - Message to present to the member
    pub fn user_message(&self) -> String {
        match self {
            Self::VerificationErr(err) => {
                if err.is_collaborator_failure() {
                    tracing::error!("Verification collaborator failure: {}", err);
                }
                err.user_message()
            }
            Self::TicketErr(err) => err.user_message(),
            Self::DirectoryUnavailable(msg) => {
                tracing::error!("Guild directory unavailable: {}", msg);
                "Discord did not accept that request, please try again later.".to_string()
            }
            err => {
                tracing::error!("{}", err);
                "Something went wrong, please try again later.".to_string()
            }
        }
    }

    /// Whether the error is an expected validation outcome rather than a fault.
    ///
    /// # Returns
    /// - `true` - The member's request was rejected by a rule
    /// - `false` - A collaborator, database, or internal failure occurred
    pub fn is_expected(&self) -> bool {
        match self {
            Self::VerificationErr(err) => !err.is_collaborator_failure(),
            Self::TicketErr(_) => true,
            _ => false,
        }
    }
}
