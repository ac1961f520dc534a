use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, error::AppError, state::BotState};

/// Builds the gateway client and runs it until shutdown.
///
/// # Arguments
/// - `state` - Shared database, configuration and mailer
///
/// # Returns
/// - `Ok(())` - Client shut down cleanly
/// - `Err(AppError::DiscordErr)` - Client could not be built or the gateway connection failed
pub async fn start_bot(state: BotState) -> Result<(), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_MEMBERS;

    let token = state.config.discord_bot_token.clone();
    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
