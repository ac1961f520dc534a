//! Audit log relayed to a Discord channel.
//!
//! Every entry is written through `tracing` and posted as an embed to the configured log
//! channel. Recording never fails from the caller's point of view; a channel that cannot be
//! reached only costs the embed.

use async_trait::async_trait;
use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};
use std::sync::Arc;

use crate::model::audit::AuditKind;

/// Longest embed description Discord accepts, in characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
const CODE_FENCE: &str = "```";

/// Sink for operational events such as ticket and profile transitions.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, kind: AuditKind, message: &str);
}

/// Audit log posting embeds to a guild text channel.
pub struct DiscordAuditLog {
    http: Arc<Http>,
    channel_id: u64,
}

impl DiscordAuditLog {
    /// Creates a new DiscordAuditLog instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    /// - `channel_id` - Channel receiving the audit embeds
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        Self { http, channel_id }
    }

    fn build_embed(kind: AuditKind, message: &str) -> CreateEmbed {
        CreateEmbed::new()
            .title(kind.title())
            .description(embed_description(message))
            .timestamp(Timestamp::now())
            .color(kind.color())
    }
}

/// Wraps `message` in a code block, cut to fit an embed description.
fn embed_description(message: &str) -> String {
    let room = EMBED_DESCRIPTION_LIMIT - 2 * CODE_FENCE.len();
    let body: String = message.chars().take(room).collect();

    format!("{CODE_FENCE}{body}{CODE_FENCE}")
}

#[async_trait]
impl AuditLog for DiscordAuditLog {
    async fn record(&self, kind: AuditKind, message: &str) {
        match kind {
            AuditKind::Error => tracing::error!("[{}] {}", kind.title(), message),
            _ => tracing::info!("[{}] {}", kind.title(), message),
        }

        let embed = Self::build_embed(kind, message);
        let result = ChannelId::new(self.channel_id)
            .send_message(self.http.as_ref(), CreateMessage::new().embed(embed))
            .await;

        if let Err(e) = result {
            tracing::warn!(
                "Failed to post audit entry to channel {}: {:?}",
                self.channel_id,
                e
            );
        }
    }
}
