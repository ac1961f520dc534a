//! Plain data exchanged with the guild directory.

/// A guild role resolved from its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: u64,
    pub name: String,
}

/// A single channel message as captured for a ticket transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub author: String,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// A message the bot posts into a channel.
///
/// Carries only what decides the rendering; the directory implementation turns it into
/// an embed and components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub title: String,
    pub description: String,
    /// Attach the button that closes the ticket the channel belongs to.
    pub close_ticket_button: bool,
}
