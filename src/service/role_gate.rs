//! Role interaction dispatch.
//!
//! Members request roles by pressing a role button or picking a role from a select menu.
//! The `RoleGate` classifies the role by the configured role ids and hands the request to
//! the ticket lifecycle, the verification flow, or a plain toggle.

use crate::{
    config::GuildConfig,
    error::AppError,
    model::{
        role_gate::{RoleCategory, RoleGateOutcome, RoleRequest},
        ticket::TicketRequest,
    },
    service::{discord::GuildDirectory, ticket::TicketService, verification::VerificationService},
};

pub struct RoleGate<'a> {
    verification: &'a VerificationService<'a>,
    tickets: &'a TicketService<'a>,
    directory: &'a dyn GuildDirectory,
    config: &'a GuildConfig,
}

impl<'a> RoleGate<'a> {
    pub fn new(
        verification: &'a VerificationService<'a>,
        tickets: &'a TicketService<'a>,
        directory: &'a dyn GuildDirectory,
        config: &'a GuildConfig,
    ) -> Self {
        Self {
            verification,
            tickets,
            directory,
            config,
        }
    }

    /// Category of a role by its id.
    pub fn classify(&self, role_id: u64) -> RoleCategory {
        if role_id == self.config.affiliation_role_id {
            RoleCategory::Affiliation
        } else if role_id == self.config.non_affiliation_role_id {
            RoleCategory::NonAffiliation
        } else if self.config.esports_role_ids.contains(&role_id) {
            RoleCategory::EsportsPosition
        } else {
            RoleCategory::Generic
        }
    }

    /// Handles a role request and returns what to reply with.
    ///
    /// # Returns
    /// - `Ok(RoleGateOutcome)` - Action taken or instruction for the member
    /// - `Err(TicketError::TicketAlreadyOpen)` - Esports request while a ticket is open
    /// - `Err(AppError::DirectoryUnavailable)` - Role or channel operation failed
    /// - `Err(AppError::DbErr)` - Database error reading profile or ticket state
    pub async fn handle(&self, request: RoleRequest) -> Result<RoleGateOutcome, AppError> {
        match self.classify(request.role_id) {
            RoleCategory::EsportsPosition => self.request_position(request).await,
            RoleCategory::Affiliation => self.request_affiliation(request).await,
            RoleCategory::NonAffiliation => self.toggle_non_affiliation(request).await,
            RoleCategory::Generic => self.toggle(request).await,
        }
    }

    async fn request_position(&self, request: RoleRequest) -> Result<RoleGateOutcome, AppError> {
        if request.has_role {
            return Ok(RoleGateOutcome::AlreadyHasRole);
        }

        if !self.verification.is_verified(request.member_id).await? {
            return Ok(RoleGateOutcome::VerifyFirst);
        }

        let ticket = self
            .tickets
            .open(TicketRequest {
                owner_id: request.member_id,
                owner_name: request.member_name,
                role: request.role_name,
            })
            .await?;

        Ok(RoleGateOutcome::TicketOpened {
            channel_id: ticket.id,
        })
    }

    /// Re-applies the affiliation role to verified members and drops the exclusive one.
    async fn request_affiliation(
        &self,
        request: RoleRequest,
    ) -> Result<RoleGateOutcome, AppError> {
        if !self.verification.is_verified(request.member_id).await? {
            return Ok(RoleGateOutcome::PromptVerification);
        }

        self.directory
            .add_role_to_member(request.member_id, self.config.affiliation_role_id)
            .await?;

        let non_affiliation = self.config.non_affiliation_role_id;
        if self
            .directory
            .member_has_role(request.member_id, non_affiliation)
            .await?
        {
            self.directory
                .remove_role_from_member(request.member_id, non_affiliation)
                .await?;
        }

        Ok(RoleGateOutcome::AffiliationGranted)
    }

    async fn toggle_non_affiliation(
        &self,
        request: RoleRequest,
    ) -> Result<RoleGateOutcome, AppError> {
        if !request.has_role && self.verification.is_verified(request.member_id).await? {
            return Ok(RoleGateOutcome::MutuallyExclusive);
        }

        self.toggle(request).await
    }

    async fn toggle(&self, request: RoleRequest) -> Result<RoleGateOutcome, AppError> {
        if request.has_role {
            self.directory
                .remove_role_from_member(request.member_id, request.role_id)
                .await?;
            Ok(RoleGateOutcome::RoleRemoved {
                role_id: request.role_id,
            })
        } else {
            self.directory
                .add_role_to_member(request.member_id, request.role_id)
                .await?;
            Ok(RoleGateOutcome::RoleAdded {
                role_id: request.role_id,
            })
        }
    }
}
