//! Ready event handler for bot initialization.
//!
//! Fired once the bot completed the gateway handshake. Registers the slash commands that
//! drive email verification in the managed guild and records the restart in the audit log.

use dioxus_logger::tracing;
use serenity::all::{
    CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId, Ready,
};

use crate::{
    model::audit::AuditKind,
    service::audit::{AuditLog, DiscordAuditLog},
    state::BotState,
};

/// Name of the command starting verification.
pub const VERIFY_COMMAND: &str = "verify";
/// Name of the command confirming the emailed code.
pub const AUTHENTICATE_COMMAND: &str = "authenticate";

fn guild_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(VERIFY_COMMAND)
            .description("Initiates Purdue email verification process.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "email",
                    "Your Purdue University email address.",
                )
                .required(true),
            ),
        CreateCommand::new(AUTHENTICATE_COMMAND)
            .description("Completes Purdue email verification with your one-time code.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "code",
                    "The one-time code sent to your email.",
                )
                .required(true),
            ),
    ]
}

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared bot state providing the guild configuration
/// - `ctx` - Discord context providing the HTTP client
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let guild_id = GuildId::new(state.config.guild.guild_id);
    match guild_id.set_commands(&ctx.http, guild_commands()).await {
        Ok(commands) => {
            tracing::info!(
                "Registered {} commands in guild {}",
                commands.len(),
                guild_id
            )
        }
        Err(e) => tracing::error!("Failed to register commands in guild {}: {:?}", guild_id, e),
    }

    let audit = DiscordAuditLog::new(ctx.http.clone(), state.config.guild.log_channel_id);
    audit
        .record(
            AuditKind::Restart,
            &format!("{} connected to the gateway", ready.user.name),
        )
        .await;
}
