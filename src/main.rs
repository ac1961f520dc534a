mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use std::sync::Arc;

use crate::{
    config::Config, error::AppError, service::email::SmtpEmailSender, state::BotState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    dioxus_logger::init(Level::INFO).map_err(|e| AppError::InternalError(e.to_string()))?;

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let mailer = SmtpEmailSender::new(&config.smtp)?;

    tracing::info!("Starting bot for guild {}", config.guild.guild_id);

    bot::start::start_bot(BotState::new(db, config, Arc::new(mailer))).await
}
