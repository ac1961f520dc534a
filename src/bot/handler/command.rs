//! Slash command handlers for `/verify` and `/authenticate`.

use dioxus_logger::tracing;
use serenity::all::{CommandInteraction, Context};

use crate::{
    error::{verification::VerificationError, AppError},
    model::profile::VerificationCompleted,
};

use super::{
    interaction::{deferred, Collaborators, Origin, Reply},
    ready::{AUTHENTICATE_COMMAND, VERIFY_COMMAND},
};

/// Handles a slash command and replies ephemerally.
///
/// The command is deferred first; the email relay and Discord calls behind it can outlast
/// the interaction deadline.
pub async fn handle_command(
    collaborators: &Collaborators<'_>,
    ctx: &Context,
    command: &CommandInteraction,
) {
    if let Err(e) = command.create_response(&ctx.http, deferred()).await {
        tracing::error!("Failed to defer /{}: {:?}", command.data.name, e);
        return;
    }

    let origin = Origin {
        user_id: command.user.id.get(),
        user_name: command.user.name.clone(),
        channel_id: command.channel_id.get(),
    };
    let action = format!("/{}", command.data.name);
    collaborators.record_interaction(&origin, &action).await;

    let result = match command.data.name.as_str() {
        VERIFY_COMMAND => verify(collaborators, command).await,
        AUTHENTICATE_COMMAND => authenticate(collaborators, command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(Reply::Text("Unknown command.".to_string()))
        }
    };

    let reply = match result {
        Ok(reply) => reply,
        Err(err) => collaborators.reply_for_error(&origin, &action, err).await,
    };

    if let Err(e) = command.edit_response(&ctx.http, reply.into_edit()).await {
        tracing::error!("Failed to respond to /{}: {:?}", command.data.name, e);
    }
}

async fn verify(
    collaborators: &Collaborators<'_>,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    let email = command
        .data
        .options
        .iter()
        .find(|option| option.name == "email")
        .and_then(|option| option.value.as_str())
        .unwrap_or_default();

    let sent = collaborators
        .verification()
        .start(command.user.id.get(), &command.user.name, email)
        .await?;

    Ok(Reply::Text(format!(
        "A confirmation email containing your one-time code was sent to `{}`.",
        sent.email
    )))
}

async fn authenticate(
    collaborators: &Collaborators<'_>,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    let code = command
        .data
        .options
        .iter()
        .find(|option| option.name == "code")
        .and_then(|option| option.value.as_i64())
        .ok_or(VerificationError::CodeMismatch)?;

    let completed = collaborators
        .verification()
        .complete(command.user.id.get(), code)
        .await?;

    Ok(Reply::Text(completion_message(&completed)))
}

/// Reply text after a successful confirmation.
pub fn completion_message(completed: &VerificationCompleted) -> String {
    if completed.role_granted {
        "You have successfully been authenticated!".to_string()
    } else {
        "You have successfully been authenticated, but the Purdue role could not be applied. Press the Purdue role button to receive it.".to_string()
    }
}
