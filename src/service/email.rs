//! Outgoing email over an authenticated SMTP relay.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    config::SmtpConfig,
    error::{email::EmailError, AppError},
};

/// Capability to deliver a plain text email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends one message and resolves once the relay accepted or refused it.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// Email sender backed by a lettre SMTP transport.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Builds the transport for the configured relay.
    ///
    /// Connections are opened lazily on first send, so a wrong password only surfaces when
    /// the first code is delivered.
    ///
    /// # Returns
    /// - `Ok(SmtpEmailSender)` - Transport ready to send
    /// - `Err(AppError::EmailErr)` - Relay host or sender address is invalid
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(EmailError::from)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config.from.parse::<Mailbox>().map_err(EmailError::from)?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            return Err(EmailError::Rejected(format!(
                "relay answered with code {}",
                response.code()
            )));
        }

        Ok(())
    }
}
