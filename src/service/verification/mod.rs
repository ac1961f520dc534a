//! Email verification engine.
//!
//! This module provides the `VerificationService` that takes a guild member from
//! unverified to verified through a one-time code sent to an institutional address, then
//! grants the affiliation role. The profile store is the single source of truth for a
//! member's state; every call re-reads it and relies on the store's conditional updates
//! rather than in-memory locks.
//!
//! - `address` - Email syntax and domain validation
//! - `code` - One-time code generation

pub mod address;
pub mod code;

use dioxus_logger::tracing;

use crate::{
    config::VerificationConfig,
    data::{is_unique_violation, ProfileStore},
    error::{verification::VerificationError, AppError},
    model::{
        audit::AuditKind,
        profile::{CreateProfileParam, VerificationCompleted, VerificationSent},
    },
    service::{audit::AuditLog, discord::GuildDirectory, email::EmailSender},
};

use self::{address::validate_email, code::generate_code};

/// Subject line of the verification email.
pub const VERIFICATION_EMAIL_SUBJECT: &str = "PUGG Discord Account Verification";

/// Body of the verification email carrying `code`.
pub fn verification_email_body(code: i32) -> String {
    format!(
        "Use this one-time code to verify your account!\nCode: {}\nUse the command '/authenticate' in any channel.",
        code
    )
}

/// Service driving the email verification flow for guild members.
pub struct VerificationService<'a> {
    profiles: &'a dyn ProfileStore,
    mailer: &'a dyn EmailSender,
    directory: &'a dyn GuildDirectory,
    audit: &'a dyn AuditLog,
    config: &'a VerificationConfig,
    /// Role granted once a member is verified.
    affiliation_role_id: u64,
}

impl<'a> VerificationService<'a> {
    /// Creates a new VerificationService instance.
    ///
    /// # Arguments
    /// - `profiles` - Store holding member profiles
    /// - `mailer` - Sender delivering the one-time code
    /// - `directory` - Guild directory used for the affiliation role grant
    /// - `audit` - Audit log receiving profile events
    /// - `config` - Permitted domains and code width
    /// - `affiliation_role_id` - Role granted after verification
    ///
    /// # Returns
    /// - `VerificationService` - New service instance
    pub fn new(
        profiles: &'a dyn ProfileStore,
        mailer: &'a dyn EmailSender,
        directory: &'a dyn GuildDirectory,
        audit: &'a dyn AuditLog,
        config: &'a VerificationConfig,
        affiliation_role_id: u64,
    ) -> Self {
        Self {
            profiles,
            mailer,
            directory,
            audit,
            config,
            affiliation_role_id,
        }
    }

    /// Issues a fresh one-time code to `email` for the member.
    ///
    /// A member who is already verified gets the affiliation role re-applied and no email.
    /// Otherwise the address is validated, a code is generated and sent, and only after
    /// the relay accepted the message is the profile created or overwritten with the new
    /// address and code. A failed send leaves any earlier pending code in place.
    ///
    /// # Arguments
    /// - `member_id` - Discord ID of the member
    /// - `username` - Display name stored alongside the profile
    /// - `email` - Address submitted by the member
    ///
    /// # Returns
    /// - `Ok(VerificationSent)` - Code delivered and stored
    /// - `Err(VerificationError::AlreadyVerified)` - Member already verified, role re-applied
    /// - `Err(VerificationError::InvalidEmail)` - Malformed address or foreign domain
    /// - `Err(VerificationError::EmailAlreadyInUse)` - Another member verified with the address
    /// - `Err(VerificationError::EmailDeliveryFailed)` - Relay refused the message, nothing stored
    /// - `Err(AppError::DbErr)` - Database error reading or writing the profile
    pub async fn start(
        &self,
        member_id: u64,
        username: &str,
        email: &str,
    ) -> Result<VerificationSent, AppError> {
        let existing = self.profiles.get_by_id(member_id).await?;

        if existing.as_ref().is_some_and(|profile| profile.status) {
            self.grant_affiliation(member_id).await;
            return Err(VerificationError::AlreadyVerified.into());
        }

        let address = validate_email(email, &self.config.permitted_domains)?;
        self.ensure_address_unclaimed(member_id, &address).await?;

        let code = generate_code(self.config);

        if let Err(e) = self
            .mailer
            .send(
                &address,
                VERIFICATION_EMAIL_SUBJECT,
                &verification_email_body(code),
            )
            .await
        {
            tracing::error!(
                "Failed to send verification email to {} for member {}: {}",
                address,
                member_id,
                e
            );
            return Err(VerificationError::EmailDeliveryFailed {
                address,
                reason: e.to_string(),
            }
            .into());
        }

        let param = CreateProfileParam {
            id: member_id,
            username: username.to_string(),
            email: address.clone(),
            code,
        };

        match existing {
            Some(_) => self.reissue(param).await?,
            None => match self.profiles.create(param.clone()).await {
                Ok(profile) => {
                    self.audit
                        .record(
                            AuditKind::ProfileCreate,
                            &format!("{} ({}) <{}>", profile.username, profile.id, profile.email),
                        )
                        .await;
                }
                // A concurrent start created the profile first; take it over.
                Err(e) if is_unique_violation(&e) => self.reissue(param).await?,
                Err(e) => return Err(e),
            },
        }

        tracing::info!("Sent verification code to {} for member {}", address, member_id);

        Ok(VerificationSent { email: address })
    }

    /// Confirms the pending code of a member and grants the affiliation role.
    ///
    /// The transition to verified is a conditional update on the stored code, so two
    /// confirmations of the same code cannot both succeed. The role grant is best-effort:
    /// a failure leaves the profile verified and is reported through `role_granted`.
    ///
    /// # Arguments
    /// - `member_id` - Discord ID of the member
    /// - `code` - Code entered by the member
    ///
    /// # Returns
    /// - `Ok(VerificationCompleted)` - Profile verified
    /// - `Err(VerificationError::NoPendingVerification)` - Member never started verification
    /// - `Err(VerificationError::AlreadyVerified)` - No code is pending any more
    /// - `Err(VerificationError::CodeMismatch)` - Code differs from the pending one
    /// - `Err(VerificationError::EmailAlreadyInUse)` - Address got verified by another member
    /// - `Err(AppError::DbErr)` - Database error reading or writing the profile
    pub async fn complete(
        &self,
        member_id: u64,
        code: i64,
    ) -> Result<VerificationCompleted, AppError> {
        let profile = self
            .profiles
            .get_by_id(member_id)
            .await?
            .ok_or(VerificationError::NoPendingVerification)?;

        if !profile.has_pending_code() {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let submitted = i32::try_from(code)
            .ok()
            .filter(|submitted| *submitted == profile.code)
            .ok_or(VerificationError::CodeMismatch)?;

        self.ensure_address_unclaimed(member_id, &profile.email)
            .await?;

        if !self.profiles.consume_code(member_id, submitted).await? {
            return Err(self.lost_confirmation(member_id).await?.into());
        }

        self.audit
            .record(
                AuditKind::ProfileVerify,
                &format!("{} ({}) <{}>", profile.username, profile.id, profile.email),
            )
            .await;
        tracing::info!("Member {} verified as {}", member_id, profile.email);

        let role_granted = self.grant_affiliation(member_id).await;

        Ok(VerificationCompleted { role_granted })
    }

    /// Whether the member has completed verification.
    pub async fn is_verified(&self, member_id: u64) -> Result<bool, AppError> {
        Ok(self
            .profiles
            .get_by_id(member_id)
            .await?
            .is_some_and(|profile| profile.status))
    }

    /// Applies the affiliation role, logging instead of failing.
    ///
    /// # Returns
    /// - `true` - Role applied
    /// - `false` - Guild directory refused the change
    pub async fn grant_affiliation(&self, member_id: u64) -> bool {
        match self
            .directory
            .add_role_to_member(member_id, self.affiliation_role_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to grant affiliation role to member {}: {}",
                    member_id,
                    e
                );
                false
            }
        }
    }

    /// Fails if a different, verified member already holds `address`.
    async fn ensure_address_unclaimed(
        &self,
        member_id: u64,
        address: &str,
    ) -> Result<(), AppError> {
        let holder = self.profiles.find_by_email(address).await?;

        match holder {
            Some(holder) if holder.status && holder.id != member_id => {
                Err(VerificationError::EmailAlreadyInUse(address.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Stores a new code on a pending profile.
    async fn reissue(&self, param: CreateProfileParam) -> Result<(), AppError> {
        let member_id = param.id;

        if self.profiles.reissue_code(param).await? {
            Ok(())
        } else {
            // Verified between the initial read and the write.
            tracing::warn!(
                "Member {} was verified while a new code was being issued",
                member_id
            );
            Err(VerificationError::AlreadyVerified.into())
        }
    }

    /// Explains why a matching code could not be consumed.
    ///
    /// Another request either verified the member or replaced the code in the meantime.
    async fn lost_confirmation(&self, member_id: u64) -> Result<VerificationError, AppError> {
        let current = self.profiles.get_by_id(member_id).await?;

        Ok(match current {
            Some(profile) if profile.status => VerificationError::AlreadyVerified,
            Some(_) => VerificationError::CodeMismatch,
            None => VerificationError::NoPendingVerification,
        })
    }
}
