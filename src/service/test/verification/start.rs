use super::*;

/// Tests issuing a code to a member without a profile.
///
/// Expected: one email with a six digit code, pending profile storing that code
#[tokio::test]
async fn sends_code_and_creates_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    let sent = service.start(1001, "pete", "Pete@Purdue.edu").await?;

    assert_eq!(sent.email, "pete@purdue.edu");

    let emails = fakes.mailer.sent();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "pete@purdue.edu");
    assert_eq!(emails[0].subject, "PUGG Discord Account Verification");
    assert!(emails[0].body.contains("/authenticate"));

    let code = fakes.mailer.last_code().unwrap();
    assert!((100_000..=999_999).contains(&code));

    let profile = profiles.get_by_id(1001).await?.unwrap();
    assert_eq!(profile.username, "pete");
    assert_eq!(profile.email, "pete@purdue.edu");
    assert_eq!(profile.code as i64, code);
    assert!(!profile.status);
    assert_eq!(fakes.audit.count(AuditKind::ProfileCreate), 1);

    Ok(())
}

/// Tests rejecting an address outside the permitted domains.
///
/// Expected: Err(InvalidEmail), no email attempt and no profile
#[tokio::test]
async fn rejects_foreign_domain() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    let result = service.start(1002, "pete", "student@gmail.com").await;

    assert_verification_err(
        result,
        VerificationError::InvalidEmail("student@gmail.com".to_string()),
    );
    assert_eq!(fakes.mailer.attempts(), 0);
    assert!(profiles.get_by_id(1002).await?.is_none());

    Ok(())
}

/// Tests starting again after verification completed.
///
/// Expected: Err(AlreadyVerified), affiliation role re-applied, no email sent
#[tokio::test]
async fn already_verified_reapplies_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_verified_profile(db, "1003").await?;

    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    let result = service.start(1003, "pete", "pete@purdue.edu").await;

    assert_verification_err(result, VerificationError::AlreadyVerified);
    assert!(fakes.directory.has_role(1003, AFFILIATION_ROLE));
    assert_eq!(fakes.mailer.attempts(), 0);

    let profile = profiles.get_by_id(1003).await?.unwrap();
    assert_eq!(profile.code, NO_PENDING_CODE);

    Ok(())
}

/// Tests that an address verified by one member cannot be used by another.
///
/// Expected: Err(EmailAlreadyInUse) for the second member once the first verified
#[tokio::test]
async fn rejects_address_verified_by_other_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    service.start(1004, "first", "shared@purdue.edu").await?;
    let code = fakes.mailer.last_code().unwrap();
    service.complete(1004, code).await?;

    let result = service.start(1005, "second", "SHARED@purdue.edu").await;

    assert_verification_err(
        result,
        VerificationError::EmailAlreadyInUse("shared@purdue.edu".to_string()),
    );
    assert_eq!(fakes.mailer.attempts(), 1);
    assert!(profiles.get_by_id(1005).await?.is_none());

    Ok(())
}

/// Tests that a pending holder of an address does not block another member.
///
/// Expected: Ok for both members
#[tokio::test]
async fn pending_holder_does_not_block_address() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    service.start(1006, "first", "shared@purdue.edu").await?;
    service.start(1007, "second", "shared@purdue.edu").await?;

    assert_eq!(fakes.mailer.sent().len(), 2);

    Ok(())
}

/// Tests that nothing is stored when the relay refuses the email.
///
/// Expected: Err(EmailDeliveryFailed) after one attempt, no profile
#[tokio::test]
async fn delivery_failure_stores_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new().with_mailer(FakeMailer::failing());
    let service = fakes.verification_service(&profiles);

    let result = service.start(1008, "pete", "pete@purdue.edu").await;

    assert_verification_err(
        result,
        VerificationError::EmailDeliveryFailed {
            address: "pete@purdue.edu".to_string(),
            reason: "relay unavailable".to_string(),
        },
    );
    assert_eq!(fakes.mailer.attempts(), 1);
    assert!(profiles.get_by_id(1008).await?.is_none());
    assert_eq!(fakes.audit.count(AuditKind::ProfileCreate), 0);

    Ok(())
}

/// Tests that a failed resend keeps the code issued earlier.
///
/// Expected: Err(EmailDeliveryFailed) with stored email and code unchanged
#[tokio::test]
async fn delivery_failure_keeps_previous_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::profile::ProfileFactory::new(db)
        .id("1009")
        .email("old@purdue.edu")
        .code(111111)
        .build()
        .await?;

    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new().with_mailer(FakeMailer::failing());
    let service = fakes.verification_service(&profiles);

    let result = service.start(1009, "pete", "new@purdue.edu").await;

    assert!(result.is_err());

    let profile = profiles.get_by_id(1009).await?.unwrap();
    assert_eq!(profile.email, "old@purdue.edu");
    assert_eq!(profile.code, 111111);

    Ok(())
}

/// Tests that starting again overwrites the pending address and code in place.
///
/// Expected: profile holds the new address and the newly mailed code, still pending
#[tokio::test]
async fn restart_overwrites_pending_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::profile::ProfileFactory::new(db)
        .id("1010")
        .email("old@purdue.edu")
        .code(111111)
        .build()
        .await?;

    let profiles = ProfileRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.verification_service(&profiles);

    service.start(1010, "pete", "new@alumni.purdue.edu").await?;

    let code = fakes.mailer.last_code().unwrap();
    let profile = profiles.get_by_id(1010).await?.unwrap();
    assert_eq!(profile.email, "new@alumni.purdue.edu");
    assert_eq!(profile.code as i64, code);
    assert!(!profile.status);
    assert_eq!(fakes.audit.count(AuditKind::ProfileCreate), 0);

    Ok(())
}
