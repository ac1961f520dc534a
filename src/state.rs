//! Bot state shared across all event handlers.
//!
//! Holds the resources every interaction needs. The state is built once during startup
//! and moved into the event handler; the HTTP client is not part of it because each
//! event carries its own through the gateway context.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{config::Config, service::email::EmailSender};

/// Shared resources and configuration of the bot.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Config` and the mailer are reference-counted
#[derive(Clone)]
pub struct BotState {
    /// Database connection pool for profiles and tickets.
    pub db: DatabaseConnection,

    /// Configuration loaded from the environment at startup.
    pub config: Arc<Config>,

    /// Mail transport delivering one-time codes.
    pub mailer: Arc<dyn EmailSender>,
}

impl BotState {
    /// Creates a new bot state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration
    /// - `mailer` - Mail transport for verification emails
    ///
    /// # Returns
    /// - `BotState` - Initialized state ready to hand to the event handler
    pub fn new(db: DatabaseConnection, config: Config, mailer: Arc<dyn EmailSender>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }
}
