//! Modal submit handler for the email verification form.

use dioxus_logger::tracing;
use serenity::all::{ActionRowComponent, Context, ModalInteraction};

use crate::error::AppError;

use super::interaction::{
    deferred, Collaborators, Origin, Reply, EMAIL_INPUT_ID, VERIFY_EMAIL_MODAL_ID,
};

/// Handles a submitted modal and replies ephemerally.
///
/// The submit is deferred before the verification email goes out.
pub async fn handle_modal(
    collaborators: &Collaborators<'_>,
    ctx: &Context,
    modal: &ModalInteraction,
) {
    if modal.data.custom_id != VERIFY_EMAIL_MODAL_ID {
        tracing::warn!("Received unknown modal {}", modal.data.custom_id);
        return;
    }

    if let Err(e) = modal.create_response(&ctx.http, deferred()).await {
        tracing::error!("Failed to defer email form: {:?}", e);
        return;
    }

    let origin = Origin {
        user_id: modal.user.id.get(),
        user_name: modal.user.name.clone(),
        channel_id: modal.channel_id.get(),
    };
    let action = "the email form";
    collaborators.record_interaction(&origin, action).await;

    let reply = match submit_email(collaborators, modal).await {
        Ok(reply) => reply,
        Err(err) => collaborators.reply_for_error(&origin, action, err).await,
    };

    if let Err(e) = modal.edit_response(&ctx.http, reply.into_edit()).await {
        tracing::error!("Failed to respond to email form: {:?}", e);
    }
}

/// Value of the email field, empty if the form carries none.
fn submitted_email(modal: &ModalInteraction) -> String {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == EMAIL_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
        .unwrap_or_default()
}

async fn submit_email(
    collaborators: &Collaborators<'_>,
    modal: &ModalInteraction,
) -> Result<Reply, AppError> {
    let email = submitted_email(modal);

    let sent = collaborators
        .verification()
        .start(modal.user.id.get(), &modal.user.name, &email)
        .await?;

    Ok(Reply::Text(format!(
        "A confirmation email containing your one-time code was sent to `{}`. Use **/authenticate** with the code to finish.",
        sent.email
    )))
}
