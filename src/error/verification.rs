use thiserror::Error;

/// Outcomes of the email verification flow that stop a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Address failed syntax validation or is outside the permitted domains.
    #[error("Email '{0}' is not a permitted address")]
    InvalidEmail(String),

    /// Another member already verified with this address.
    #[error("Email '{0}' is already verified by another member")]
    EmailAlreadyInUse(String),

    /// SMTP delivery of the one-time code failed. No profile was written.
    #[error("Failed to deliver verification email to '{address}': {reason}")]
    EmailDeliveryFailed {
        /// Recipient address
        address: String,
        /// Transport error description
        reason: String,
    },

    /// Member has already completed verification.
    #[error("Member is already verified")]
    AlreadyVerified,

    /// Member never started verification.
    #[error("Member has no pending verification")]
    NoPendingVerification,

    /// Submitted code does not match the pending code.
    #[error("Submitted code does not match")]
    CodeMismatch,
}

impl VerificationError {
    /// Whether the error comes from a failing collaborator rather than a rule.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::EmailDeliveryFailed { .. })
    }

    /// Short reason presented to the member.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(address) => format!(
                "The email you provided, {}, was invalid. Please use a valid Purdue email or Alumni email.",
                address
            ),
            Self::EmailAlreadyInUse(_) => {
                "That email has already been used to verify another account.".to_string()
            }
            Self::EmailDeliveryFailed { address, .. } => format!(
                "We could not send a verification email to `{}`. Please try again later.",
                address
            ),
            Self::AlreadyVerified => "You have already been verified!".to_string(),
            Self::NoPendingVerification => {
                "You need to submit an email for verification first. (/verify)".to_string()
            }
            Self::CodeMismatch => "Sorry, this code is incorrect.".to_string(),
        }
    }
}
