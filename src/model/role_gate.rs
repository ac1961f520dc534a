//! Role interaction classification and reply payloads.

/// How a requested role is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    /// Coach, captain, player and similar roles granted by officers through a ticket.
    EsportsPosition,
    /// Role proving institutional affiliation, granted only after verification.
    Affiliation,
    /// Self-assignable role for non-affiliated members, exclusive with `Affiliation`.
    NonAffiliation,
    /// Any other self-assignable role.
    Generic,
}

/// A member pressing a role button or picking a role from a menu.
#[derive(Debug, Clone)]
pub struct RoleRequest {
    pub member_id: u64,
    pub member_name: String,
    pub role_id: u64,
    pub role_name: String,
    /// Whether the member currently holds the role.
    pub has_role: bool,
}

/// What the bot should reply with after a role interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleGateOutcome {
    AlreadyHasRole,
    VerifyFirst,
    TicketOpened { channel_id: u64 },
    AffiliationGranted,
    /// Member is not verified; show the email form.
    PromptVerification,
    RoleAdded { role_id: u64 },
    RoleRemoved { role_id: u64 },
    /// Non-affiliation role refused because the member is a verified affiliate.
    MutuallyExclusive,
}

impl RoleGateOutcome {
    /// Reply text for the outcome.
    pub fn reply_content(&self) -> String {
        match self {
            Self::AlreadyHasRole => "You already have this role.".to_string(),
            Self::VerifyFirst => {
                "Please verify yourself first with **/verify** in any channel.".to_string()
            }
            Self::TicketOpened { channel_id } => format!(
                "A ticket has been opened for you. Please follow instructions in <#{}>",
                channel_id
            ),
            Self::AffiliationGranted => "You have been verified and given the role.".to_string(),
            Self::PromptVerification => "Use the command **/verify** in any channel to verify your purdue email and receive the Purdue role.".to_string(),
            Self::RoleAdded { role_id } => format!(
                "You successfully applied the role **<@&{}>** to yourself.",
                role_id
            ),
            Self::RoleRemoved { role_id } => format!(
                "You successfully removed the role **<@&{}>** from yourself.",
                role_id
            ),
            Self::MutuallyExclusive => "You cannot receive this role because you already have the role 'Purdue'.".to_string(),
        }
    }
}
