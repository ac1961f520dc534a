//! Role request ticket lifecycle.
//!
//! This module provides the `TicketService` that opens a private channel per esports role
//! request and closes it again while archiving the conversation. At most one open ticket
//! per member is enforced by the store: the ticket insert fails on the unique partial index
//! over open tickets, in which case the freshly created channel is removed again.
//!
//! Closing captures the transcript, persists it together with the closed status and only
//! then deletes the channel, so a failed deletion never loses the transcript.

use dioxus_logger::tracing;

use crate::{
    data::{is_unique_violation, TicketStore},
    error::{ticket::TicketError, AppError},
    model::{
        audit::AuditKind,
        discord::{OutgoingMessage, TranscriptLine},
        ticket::{CreateTicketParam, Ticket, TicketRequest},
    },
    service::{audit::AuditLog, discord::GuildDirectory},
};

/// Number of most recent messages captured in a transcript.
pub const TRANSCRIPT_MESSAGE_LIMIT: u8 = 100;

/// Service managing role request tickets.
pub struct TicketService<'a> {
    tickets: &'a dyn TicketStore,
    directory: &'a dyn GuildDirectory,
    audit: &'a dyn AuditLog,
}

impl<'a> TicketService<'a> {
    /// Creates a new TicketService instance.
    ///
    /// # Arguments
    /// - `tickets` - Store holding ticket records
    /// - `directory` - Guild directory creating and deleting ticket channels
    /// - `audit` - Audit log receiving ticket events
    ///
    /// # Returns
    /// - `TicketService` - New service instance
    pub fn new(
        tickets: &'a dyn TicketStore,
        directory: &'a dyn GuildDirectory,
        audit: &'a dyn AuditLog,
    ) -> Self {
        Self {
            tickets,
            directory,
            audit,
        }
    }

    /// Opens a ticket channel for the member's role request.
    ///
    /// # Arguments
    /// - `request` - Requesting member and the role they asked for
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The open ticket, its id being the new channel
    /// - `Err(TicketError::TicketAlreadyOpen)` - Member already has an open ticket
    /// - `Err(AppError::DirectoryUnavailable)` - Channel could not be created
    /// - `Err(AppError::DbErr)` - Database error while persisting the ticket
    pub async fn open(&self, request: TicketRequest) -> Result<Ticket, AppError> {
        if let Some(open) = self
            .tickets
            .find_open_by_owner(request.owner_id)
            .await?
            .first()
        {
            return Err(TicketError::TicketAlreadyOpen {
                owner_id: request.owner_id,
                ticket_id: Some(open.id),
            }
            .into());
        }

        let name = ticket_channel_name(&request.owner_name, &request.role);
        let channel_id = self
            .directory
            .create_private_channel(request.owner_id, &name)
            .await?;

        let param = CreateTicketParam {
            id: channel_id,
            owner_id: request.owner_id,
            role: request.role.clone(),
        };

        let ticket = match self.tickets.create(param).await {
            Ok(ticket) => ticket,
            Err(e) => {
                self.discard_channel(channel_id).await;

                if is_unique_violation(&e) {
                    let ticket_id = self
                        .tickets
                        .find_open_by_owner(request.owner_id)
                        .await?
                        .first()
                        .map(|ticket| ticket.id);

                    return Err(TicketError::TicketAlreadyOpen {
                        owner_id: request.owner_id,
                        ticket_id,
                    }
                    .into());
                }

                return Err(e);
            }
        };

        if let Err(e) = self
            .directory
            .send_message(ticket.id, ticket_prompt())
            .await
        {
            tracing::warn!("Failed to post prompt into ticket {}: {}", ticket.id, e);
        }

        self.audit
            .record(
                AuditKind::TicketOpen,
                &format!(
                    "{} ({}) requested {} in <#{}>",
                    request.owner_name, ticket.owner_id, ticket.role, ticket.id
                ),
            )
            .await;

        Ok(ticket)
    }

    /// Closes the ticket bound to `ticket_id`, archiving its transcript.
    ///
    /// # Arguments
    /// - `ticket_id` - Channel id of the ticket
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Closed ticket with its transcript, channel deleted
    /// - `Err(TicketError::TicketNotFound)` - No ticket exists for the channel
    /// - `Err(TicketError::TicketAlreadyClosed)` - Ticket was closed before
    /// - `Err(AppError::DirectoryUnavailable)` - History could not be read (ticket left
    ///   open) or the channel could not be deleted (ticket already closed)
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn close(&self, ticket_id: u64) -> Result<Ticket, AppError> {
        let ticket = self
            .tickets
            .get_by_id(ticket_id)
            .await?
            .ok_or(TicketError::TicketNotFound(ticket_id))?;

        if !ticket.status {
            return Err(TicketError::TicketAlreadyClosed(ticket_id).into());
        }

        let history = self
            .directory
            .fetch_recent_messages(ticket_id, TRANSCRIPT_MESSAGE_LIMIT)
            .await?;
        let content = format_transcript(history);

        if !self.tickets.close_if_open(ticket_id, content).await? {
            return Err(TicketError::TicketAlreadyClosed(ticket_id).into());
        }

        let closed = self
            .tickets
            .get_by_id(ticket_id)
            .await?
            .ok_or(TicketError::TicketNotFound(ticket_id))?;

        self.audit
            .record(
                AuditKind::TicketClose,
                &format!(
                    "Ticket <#{}> of {} for {} closed with {} transcript lines",
                    closed.id,
                    closed.owner_id,
                    closed.role,
                    closed.content.lines().count()
                ),
            )
            .await;

        if let Err(e) = self.directory.delete_channel(ticket_id).await {
            tracing::error!(
                "Ticket {} closed but its channel could not be deleted: {}",
                ticket_id,
                e
            );
            return Err(e);
        }

        Ok(closed)
    }

    /// Deletes a channel created for a ticket that could not be stored.
    async fn discard_channel(&self, channel_id: u64) {
        if let Err(e) = self.directory.delete_channel(channel_id).await {
            tracing::warn!("Failed to delete orphaned ticket channel {}: {}", channel_id, e);
        }
    }
}

/// Formats channel history into a transcript.
///
/// `history` is ordered most recent first, as fetched; the transcript reads oldest first
/// with one `author: text` line per message.
pub fn format_transcript(history: Vec<TranscriptLine>) -> String {
    history
        .into_iter()
        .rev()
        .map(|line| format!("{}: {}", line.author, line.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Channel name for a ticket, `<username>-<role>` in Discord's channel name charset.
pub fn ticket_channel_name(username: &str, role: &str) -> String {
    let raw = format!("{}-{}", username, role).to_lowercase();

    let mut name = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if c.is_alphanumeric() || c == '_' { c } else { '-' };
        if c == '-' && (name.is_empty() || name.ends_with('-')) {
            continue;
        }
        name.push(c);
    }

    let name = name.trim_end_matches('-');
    if name.is_empty() {
        "ticket".to_string()
    } else {
        name.chars().take(100).collect()
    }
}

/// First message posted into a new ticket channel.
pub fn ticket_prompt() -> OutgoingMessage {
    OutgoingMessage {
        title: "Role Request Ticket".to_string(),
        description: "Please list your game and position and an Officer will review your request."
            .to_string(),
        close_ticket_button: true,
    }
}
