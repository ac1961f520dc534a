//! Serenity-backed guild directory.

use async_trait::async_trait;
use serenity::{
    all::{
        ButtonStyle, ChannelId, ChannelType, CreateActionRow, CreateButton, CreateChannel,
        CreateEmbed, CreateMessage, GetMessages, GuildId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId, UserId,
    },
    http::Http,
};
use std::sync::Arc;

use crate::{
    config::GuildConfig,
    error::AppError,
    model::discord::{OutgoingMessage, RoleInfo, TranscriptLine},
    service::discord::GuildDirectory,
};

/// Custom id of the button that closes a ticket.
pub const CLOSE_TICKET_BUTTON_ID: &str = "close_ticket";

/// Embed colour of messages posted by the bot.
const MESSAGE_COLOR: u32 = 0xcfb991;

/// Guild directory for the configured guild, talking to Discord over HTTP.
pub struct SerenityGuildDirectory {
    http: Arc<Http>,
    guild_id: GuildId,
    ticket_category_id: ChannelId,
}

impl SerenityGuildDirectory {
    /// Creates a new SerenityGuildDirectory instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    /// - `config` - Guild configuration providing the guild and ticket category ids
    ///
    /// # Returns
    /// - `SerenityGuildDirectory` - New directory instance
    pub fn new(http: Arc<Http>, config: &GuildConfig) -> Self {
        Self {
            http,
            guild_id: GuildId::new(config.guild_id),
            ticket_category_id: ChannelId::new(config.ticket_category_id),
        }
    }

    /// Permission overwrites hiding a channel from everyone but the owner.
    ///
    /// The `@everyone` role shares the guild's id. Administrators bypass overwrites.
    fn private_overwrites(&self, owner_id: u64) -> Vec<PermissionOverwrite> {
        vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(RoleId::new(self.guild_id.get())),
            },
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY
                    | Permissions::USE_APPLICATION_COMMANDS,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(UserId::new(owner_id)),
            },
        ]
    }
}

fn unavailable(action: &str, err: serenity::Error) -> AppError {
    AppError::DirectoryUnavailable(format!("{}: {}", action, err))
}

#[async_trait]
impl GuildDirectory for SerenityGuildDirectory {
    async fn fetch_role(&self, role_id: u64) -> Result<Option<RoleInfo>, AppError> {
        let roles = self
            .guild_id
            .roles(self.http.as_ref())
            .await
            .map_err(|e| unavailable("fetch guild roles", e))?;

        Ok(roles.get(&RoleId::new(role_id)).map(|role| RoleInfo {
            id: role.id.get(),
            name: role.name.clone(),
        }))
    }

    async fn add_role_to_member(&self, member_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(member_id),
                RoleId::new(role_id),
                None,
            )
            .await
            .map_err(|e| unavailable(&format!("add role {} to {}", role_id, member_id), e))
    }

    async fn remove_role_from_member(
        &self,
        member_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                self.guild_id,
                UserId::new(member_id),
                RoleId::new(role_id),
                None,
            )
            .await
            .map_err(|e| {
                unavailable(
                    &format!("remove role {} from {}", role_id, member_id),
                    e,
                )
            })
    }

    async fn member_has_role(&self, member_id: u64, role_id: u64) -> Result<bool, AppError> {
        let member = self
            .guild_id
            .member(self.http.as_ref(), UserId::new(member_id))
            .await
            .map_err(|e| unavailable(&format!("fetch member {}", member_id), e))?;

        Ok(member.roles.contains(&RoleId::new(role_id)))
    }

    async fn create_private_channel(&self, owner_id: u64, name: &str) -> Result<u64, AppError> {
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Text)
            .category(self.ticket_category_id)
            .permissions(self.private_overwrites(owner_id));

        let channel = self
            .guild_id
            .create_channel(self.http.as_ref(), builder)
            .await
            .map_err(|e| unavailable(&format!("create channel {}", name), e))?;

        Ok(channel.id.get())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete(self.http.as_ref())
            .await
            .map_err(|e| unavailable(&format!("delete channel {}", channel_id), e))?;

        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        message: OutgoingMessage,
    ) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title(message.title)
            .description(message.description)
            .color(MESSAGE_COLOR);

        let mut builder = CreateMessage::new().embed(embed);
        if message.close_ticket_button {
            let button = CreateButton::new(CLOSE_TICKET_BUTTON_ID)
                .label("Close Ticket")
                .style(ButtonStyle::Danger);
            builder = builder.components(vec![CreateActionRow::Buttons(vec![button])]);
        }

        ChannelId::new(channel_id)
            .send_message(self.http.as_ref(), builder)
            .await
            .map_err(|e| unavailable(&format!("send message to {}", channel_id), e))?;

        Ok(())
    }

    async fn fetch_recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<TranscriptLine>, AppError> {
        let messages = ChannelId::new(channel_id)
            .messages(self.http.as_ref(), GetMessages::new().limit(limit))
            .await
            .map_err(|e| unavailable(&format!("fetch history of {}", channel_id), e))?;

        Ok(messages
            .into_iter()
            .map(|message| TranscriptLine::new(message.author.name, message.content))
            .collect())
    }
}
