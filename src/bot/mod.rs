//! Discord gateway integration.
//!
//! The bot connects to the gateway, registers the verification slash commands in the
//! managed guild and routes every interaction to the engines in `service`. Handlers stay
//! thin: they pull ids and inputs out of the interaction, call a service and turn its
//! outcome or error into an ephemeral reply.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, role and channel events
//! - `GUILD_MESSAGES` - Messages in ticket channels
//! - `GUILD_MEMBERS` - Member role state (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
