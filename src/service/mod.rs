//! Business logic layer.
//!
//! Services coordinate repositories (data layer) with the external collaborators the bot
//! talks to: the guild directory, the mail relay and the audit log channel. Collaborators
//! are traits so the engines can be driven by fakes in tests and by serenity and lettre in
//! production.

pub mod audit;
pub mod discord;
pub mod email;
pub mod role_gate;
pub mod ticket;
pub mod verification;
