use thiserror::Error;

/// Outcomes of the ticket lifecycle that stop a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// Owner already has an open ticket.
    #[error("Member {owner_id} already has an open ticket")]
    TicketAlreadyOpen {
        /// Member requesting the ticket
        owner_id: u64,
        /// Channel id of the ticket that is still open, if it could be read back
        ticket_id: Option<u64>,
    },

    /// No ticket record exists for the channel.
    #[error("No ticket exists for channel {0}")]
    TicketNotFound(u64),

    /// Ticket was already closed; its transcript is immutable.
    #[error("Ticket {0} is already closed")]
    TicketAlreadyClosed(u64),
}

impl TicketError {
    /// Short reason presented to the member.
    pub fn user_message(&self) -> String {
        match self {
            Self::TicketAlreadyOpen { .. } => {
                "Request Failed: You already have an esports ticket open.".to_string()
            }
            Self::TicketNotFound(_) => "This channel is not an open ticket.".to_string(),
            Self::TicketAlreadyClosed(_) => "This ticket has already been closed.".to_string(),
        }
    }
}
