//! Interaction dispatch.
//!
//! Every interaction gets its own set of collaborators bound to the gateway context's HTTP
//! client. Commands, components and modal submits are handled in their own modules, which
//! return a `Reply`; this module records the audit entries and maps errors onto replies.
//!
//! Discord drops interactions left unanswered for three seconds, so handlers acknowledge
//! with `deferred()` before any audit post, email or channel work and deliver the reply as
//! an edit afterwards.

use serenity::{
    all::{
        Context, CreateActionRow, CreateInputText, CreateInteractionResponse,
        CreateInteractionResponseMessage, CreateModal, EditInteractionResponse, InputTextStyle,
        Interaction,
    },
    http::Http,
};
use std::sync::Arc;

use crate::{
    data::{ProfileRepository, TicketRepository},
    error::AppError,
    model::audit::AuditKind,
    service::{
        audit::{AuditLog, DiscordAuditLog},
        discord::SerenityGuildDirectory,
        ticket::TicketService,
        verification::VerificationService,
    },
    state::BotState,
};

use super::{command, component, modal};

/// Custom id of the email form shown for the affiliation role.
pub const VERIFY_EMAIL_MODAL_ID: &str = "verify_email";
/// Custom id of the email field inside the form.
pub const EMAIL_INPUT_ID: &str = "email";

/// What to answer an interaction with.
pub enum Reply {
    /// Ephemeral text message.
    Text(String),
    /// The email verification form.
    EmailForm,
}

impl Reply {
    pub fn into_response(self) -> CreateInteractionResponse {
        match self {
            Self::Text(content) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
            Self::EmailForm => CreateInteractionResponse::Modal(email_form()),
        }
    }

    /// Edit delivering this reply to a response that was deferred with `deferred()`.
    pub fn into_edit(self) -> EditInteractionResponse {
        EditInteractionResponse::new().content(self.deferred_content())
    }

    /// Text of the reply once deferred. A form can only be the first response, so
    /// `EmailForm` falls back to pointing at `/verify`.
    fn deferred_content(self) -> String {
        match self {
            Self::Text(content) => content,
            Self::EmailForm => {
                "Please verify your Purdue email with **/verify** first.".to_string()
            }
        }
    }
}

/// Ephemeral "thinking" acknowledgement for interactions whose reply takes a while.
pub fn deferred() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true))
}

fn email_form() -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Short, "Purdue email", EMAIL_INPUT_ID)
        .placeholder("pete@purdue.edu")
        .required(true);

    CreateModal::new(VERIFY_EMAIL_MODAL_ID, "Purdue Email Verification")
        .components(vec![CreateActionRow::InputText(input)])
}

/// Collaborators of the engines for the duration of one interaction.
pub struct Collaborators<'a> {
    pub state: &'a BotState,
    pub directory: SerenityGuildDirectory,
    pub audit: DiscordAuditLog,
    pub profiles: ProfileRepository<'a>,
    pub tickets: TicketRepository<'a>,
}

impl<'a> Collaborators<'a> {
    pub fn new(state: &'a BotState, http: Arc<Http>) -> Self {
        Self {
            state,
            directory: SerenityGuildDirectory::new(http.clone(), &state.config.guild),
            audit: DiscordAuditLog::new(http, state.config.guild.log_channel_id),
            profiles: ProfileRepository::new(&state.db),
            tickets: TicketRepository::new(&state.db),
        }
    }

    pub fn verification(&self) -> VerificationService<'_> {
        VerificationService::new(
            &self.profiles,
            self.state.mailer.as_ref(),
            &self.directory,
            &self.audit,
            &self.state.config.verification,
            self.state.config.guild.affiliation_role_id,
        )
    }

    pub fn tickets(&self) -> TicketService<'_> {
        TicketService::new(&self.tickets, &self.directory, &self.audit)
    }
}

/// Who triggered an interaction and where, for audit entries.
pub struct Origin {
    pub user_id: u64,
    pub user_name: String,
    pub channel_id: u64,
}

impl Collaborators<'_> {
    /// Records that `origin` used `action`.
    pub async fn record_interaction(&self, origin: &Origin, action: &str) {
        self.audit
            .record(
                AuditKind::Interaction,
                &format!(
                    "{} ({}) used {} in <#{}>",
                    origin.user_name, origin.user_id, action, origin.channel_id
                ),
            )
            .await;
    }

    /// Turns a failed action into a reply, recording unexpected failures.
    pub async fn reply_for_error(&self, origin: &Origin, action: &str, err: AppError) -> Reply {
        if !err.is_expected() {
            self.audit
                .record(
                    AuditKind::Error,
                    &format!(
                        "{} by {} ({}) in <#{}> failed: {}",
                        action, origin.user_name, origin.user_id, origin.channel_id, err
                    ),
                )
                .await;
        }

        Reply::Text(err.user_message())
    }
}

/// Handles the interaction_create event.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `ctx` - Discord context providing the HTTP client
/// - `interaction` - The incoming interaction
pub async fn handle_interaction_create(state: &BotState, ctx: Context, interaction: Interaction) {
    let collaborators = Collaborators::new(state, ctx.http.clone());

    match interaction {
        Interaction::Command(command) => {
            command::handle_command(&collaborators, &ctx, &command).await
        }
        Interaction::Component(component) => {
            component::handle_component(&collaborators, &ctx, &component).await
        }
        Interaction::Modal(modal) => modal::handle_modal(&collaborators, &ctx, &modal).await,
        _ => {}
    }
}
