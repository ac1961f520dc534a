use super::*;

/// Tests overwriting email and code while leaving status untouched.
///
/// Expected: Ok(Some) with new email and code, status still false
#[tokio::test]
async fn overwrites_email_and_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("3001")
        .email("old@purdue.edu")
        .code(100001)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo
        .update(
            3001,
            UpdateProfileParam {
                email: Some("New@purdue.edu".to_string()),
                code: Some(200002),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(profile.email, "new@purdue.edu");
    assert_eq!(profile.code, 200002);
    assert!(!profile.status);

    Ok(())
}

/// Tests that setting status stamps the verification time.
///
/// Expected: Ok(Some) with status true and verified_at set
#[tokio::test]
async fn status_true_stamps_verified_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("3002")
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo
        .update(
            3002,
            UpdateProfileParam {
                status: Some(true),
                code: Some(NO_PENDING_CODE),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(profile.status);
    assert_eq!(profile.code, NO_PENDING_CODE);
    assert!(profile.verified_at.is_some());

    Ok(())
}

/// Tests updating a member without a profile.
///
/// Expected: Ok(None) and no row created
#[tokio::test]
async fn returns_none_for_unknown_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProfileRepository::new(db);
    let result = repo
        .update(
            3003,
            UpdateProfileParam {
                code: Some(123456),
                ..Default::default()
            },
        )
        .await?;

    assert!(result.is_none());
    assert!(repo.get_by_id(3003).await?.is_none());

    Ok(())
}

/// Tests verifying a profile without passing a code.
///
/// Expected: Ok(Some) with status true and the pending code cleared
#[tokio::test]
async fn status_true_clears_pending_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("3004")
        .code(481516)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo
        .update(
            3004,
            UpdateProfileParam {
                status: Some(true),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(profile.status);
    assert_eq!(profile.code, NO_PENDING_CODE);
    assert_eq!(repo.get_by_id(3004).await?.unwrap().code, NO_PENDING_CODE);

    Ok(())
}

/// Tests attaching a code to a verified profile.
///
/// Expected: Ok(Some) with the code still cleared and status unchanged
#[tokio::test]
async fn verified_profile_refuses_new_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("3005")
        .verified()
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo
        .update(
            3005,
            UpdateProfileParam {
                username: Some("renamed".to_string()),
                code: Some(777777),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(profile.status);
    assert_eq!(profile.username, "renamed");
    assert_eq!(profile.code, NO_PENDING_CODE);

    Ok(())
}
