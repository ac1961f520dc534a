//! Audit log entry kinds.

/// Kind of event recorded in the audit log channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    TicketOpen,
    TicketClose,
    ProfileCreate,
    ProfileVerify,
    Restart,
    Interaction,
    Error,
}

impl AuditKind {
    /// Embed title for the entry.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TicketOpen => "Ticket Opened",
            Self::TicketClose => "Ticket Closed",
            Self::ProfileCreate => "Profile Created",
            Self::ProfileVerify => "Profile Verified",
            Self::Restart => "Restart",
            Self::Interaction => "Interaction",
            Self::Error => "Error",
        }
    }

    /// Embed colour for the entry.
    pub fn color(&self) -> u32 {
        match self {
            Self::TicketOpen => 0x1f8b4c,
            Self::TicketClose => 0xa84300,
            Self::ProfileCreate => 0x3498db,
            Self::ProfileVerify => 0x2ecc71,
            Self::Restart => 0x9b59b6,
            Self::Interaction => 0x95a5a6,
            Self::Error => 0xe74c3c,
        }
    }
}
