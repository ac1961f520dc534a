//! Role request ticket domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A private request channel and its lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Discord channel id of the ticket channel.
    pub id: u64,
    /// Member who requested the ticket.
    pub owner_id: u64,
    /// Role the member requested.
    pub role: String,
    /// `true` while open.
    pub status: bool,
    /// Transcript, empty until closed.
    pub content: String,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The converted ticket
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored channel or owner id is not a
    ///   snowflake
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_u64_from_string(entity.id)?,
            owner_id: parse_u64_from_string(entity.owner_id)?,
            role: entity.role,
            status: entity.status,
            content: entity.content,
            opened_at: entity.opened_at,
            closed_at: entity.closed_at,
        })
    }
}

/// Parameters for persisting a newly opened ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    /// Channel created for the ticket.
    pub id: u64,
    pub owner_id: u64,
    pub role: String,
}

/// Partial update of a ticket; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicketParam {
    pub status: Option<bool>,
    pub content: Option<String>,
}

/// A member's request for an esports position ticket.
#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub owner_id: u64,
    /// Used to name the ticket channel.
    pub owner_name: String,
    pub role: String,
}
