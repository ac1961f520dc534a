//! Guild directory capability.
//!
//! The engines perform every role, channel and message operation through the
//! `GuildDirectory` trait. `SerenityGuildDirectory` implements it against the Discord HTTP
//! API for the single guild the bot manages.

pub mod directory;

use async_trait::async_trait;

use crate::{
    error::AppError,
    model::discord::{OutgoingMessage, RoleInfo, TranscriptLine},
};

pub use directory::SerenityGuildDirectory;

/// Role, channel and message operations against the managed guild.
///
/// Every failure is reported as `AppError::DirectoryUnavailable`.
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Resolves a role, `None` if the guild has no such role.
    async fn fetch_role(&self, role_id: u64) -> Result<Option<RoleInfo>, AppError>;

    async fn add_role_to_member(&self, member_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn remove_role_from_member(&self, member_id: u64, role_id: u64)
        -> Result<(), AppError>;

    async fn member_has_role(&self, member_id: u64, role_id: u64) -> Result<bool, AppError>;

    /// Creates a text channel visible only to `owner_id` and administrators.
    ///
    /// # Returns
    /// - `Ok(u64)` - Id of the created channel
    async fn create_private_channel(&self, owner_id: u64, name: &str) -> Result<u64, AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    async fn send_message(
        &self,
        channel_id: u64,
        message: OutgoingMessage,
    ) -> Result<(), AppError>;

    /// Fetches up to `limit` messages of a channel, most recent first.
    async fn fetch_recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<TranscriptLine>, AppError>;
}
