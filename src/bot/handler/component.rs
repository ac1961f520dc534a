//! Button and select menu handlers.
//!
//! The close button of a ticket channel closes that ticket. Every other button carries a
//! role id as its custom id, and role select menus carry role ids as values; both are
//! routed through the `RoleGate`.

use dioxus_logger::tracing;
use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, RoleId,
};

use crate::{
    error::AppError,
    model::role_gate::{RoleGateOutcome, RoleRequest},
    service::{
        discord::{directory::CLOSE_TICKET_BUTTON_ID, GuildDirectory},
        role_gate::RoleGate,
    },
    util::parse::parse_u64_from_string,
};

use super::interaction::{deferred, Collaborators, Origin, Reply};

/// Handles a button press or menu selection.
pub async fn handle_component(
    collaborators: &Collaborators<'_>,
    ctx: &Context,
    component: &ComponentInteraction,
) {
    let origin = Origin {
        user_id: component.user.id.get(),
        user_name: component.user.name.clone(),
        channel_id: component.channel_id.get(),
    };

    if component.data.custom_id == CLOSE_TICKET_BUTTON_ID {
        close_ticket(collaborators, ctx, component, &origin).await;
        return;
    }

    let action = format!("role component {}", component.data.custom_id);

    let affiliation_role_id = collaborators.state.config.guild.affiliation_role_id;
    if answers_with_form(requested_role(component), affiliation_role_id) {
        // The email form must be the first response, so this reply cannot be deferred.
        let reply = role_reply(collaborators, component, &origin, &action).await;
        if let Err(e) = component
            .create_response(&ctx.http, reply.into_response())
            .await
        {
            tracing::error!("Failed to respond to {}: {:?}", action, e);
        }
        collaborators.record_interaction(&origin, &action).await;
        return;
    }

    if let Err(e) = component.create_response(&ctx.http, deferred()).await {
        tracing::error!("Failed to defer {}: {:?}", action, e);
        return;
    }
    collaborators.record_interaction(&origin, &action).await;

    let reply = role_reply(collaborators, component, &origin, &action).await;
    if let Err(e) = component.edit_response(&ctx.http, reply.into_edit()).await {
        tracing::error!("Failed to respond to {}: {:?}", action, e);
    }
}

/// Whether the requested role is the affiliation role, whose reply may be the email form.
fn answers_with_form(requested: Option<String>, affiliation_role_id: u64) -> bool {
    requested
        .and_then(|value| parse_u64_from_string(value).ok())
        .is_some_and(|role_id| role_id == affiliation_role_id)
}

async fn role_reply(
    collaborators: &Collaborators<'_>,
    component: &ComponentInteraction,
    origin: &Origin,
    action: &str,
) -> Reply {
    match request_role(collaborators, component).await {
        Ok(reply) => reply,
        Err(err) => collaborators.reply_for_error(origin, action, err).await,
    }
}

/// Closes the ticket of the channel the button was pressed in.
///
/// The interaction is acknowledged first since the channel disappears on success; only a
/// failure is answered, with a follow-up.
async fn close_ticket(
    collaborators: &Collaborators<'_>,
    ctx: &Context,
    component: &ComponentInteraction,
    origin: &Origin,
) {
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge close ticket button: {:?}", e);
    }
    collaborators
        .record_interaction(origin, "the close ticket button")
        .await;

    let Err(err) = collaborators.tickets().close(origin.channel_id).await else {
        return;
    };

    let Reply::Text(content) = collaborators
        .reply_for_error(origin, "closing a ticket", err)
        .await
    else {
        return;
    };

    let followup = CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = component.create_followup(&ctx.http, followup).await {
        tracing::error!("Failed to report close ticket failure: {:?}", e);
    }
}

/// Role id carried by a role button or the first selected menu value.
fn requested_role(component: &ComponentInteraction) -> Option<String> {
    match &component.data.kind {
        ComponentInteractionDataKind::Button => Some(component.data.custom_id.clone()),
        ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    }
}

async fn request_role(
    collaborators: &Collaborators<'_>,
    component: &ComponentInteraction,
) -> Result<Reply, AppError> {
    let Some(value) = requested_role(component) else {
        return Ok(Reply::Text("Please pick a role.".to_string()));
    };
    let role_id = parse_u64_from_string(value)?;

    let Some(role) = collaborators.directory.fetch_role(role_id).await? else {
        return Ok(Reply::Text("That role is no longer available.".to_string()));
    };

    let member_id = component.user.id.get();
    let has_role = match component.member.as_ref() {
        Some(member) => member.roles.contains(&RoleId::new(role_id)),
        None => {
            collaborators
                .directory
                .member_has_role(member_id, role_id)
                .await?
        }
    };

    let verification = collaborators.verification();
    let tickets = collaborators.tickets();
    let gate = RoleGate::new(
        &verification,
        &tickets,
        &collaborators.directory,
        &collaborators.state.config.guild,
    );

    let outcome = gate
        .handle(RoleRequest {
            member_id,
            member_name: component.user.name.clone(),
            role_id: role.id,
            role_name: role.name,
            has_role,
        })
        .await?;

    Ok(match outcome {
        RoleGateOutcome::PromptVerification => Reply::EmailForm,
        outcome => Reply::Text(outcome.reply_content()),
    })
}
