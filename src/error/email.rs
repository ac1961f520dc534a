use thiserror::Error;

/// Failures while composing or delivering an email.
#[derive(Error, Debug)]
pub enum EmailError {
    /// Sender or recipient is not a valid mailbox.
    #[error(transparent)]
    Address(#[from] lettre::address::AddressError),

    /// Message could not be built.
    #[error(transparent)]
    Message(#[from] lettre::error::Error),

    /// SMTP relay rejected the message or could not be reached.
    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Delivery refused for another reason.
    #[error("{0}")]
    Rejected(String),
}
