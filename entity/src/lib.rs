//! SeaORM entity definitions for the bot's persisted records.

pub mod prelude;

pub mod profile;
pub mod ticket;
