use super::*;

/// Tests finding a profile by email regardless of case.
///
/// Expected: Ok(Some) for a differently cased query
#[tokio::test]
async fn matches_case_insensitively() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("4001")
        .email("boiler@purdue.edu")
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo.find_by_email("BOILER@purdue.edu").await?.unwrap();

    assert_eq!(profile.id, 4001);

    Ok(())
}

/// Tests that a verified holder wins over pending profiles with the same address.
///
/// Expected: Ok(Some) returning the verified profile
#[tokio::test]
async fn prefers_verified_holder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("4002")
        .email("shared@purdue.edu")
        .build()
        .await?;
    factory::profile::ProfileFactory::new(db)
        .id("4003")
        .email("shared@purdue.edu")
        .verified()
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let profile = repo.find_by_email("shared@purdue.edu").await?.unwrap();

    assert_eq!(profile.id, 4003);
    assert!(profile.status);

    Ok(())
}

/// Tests looking up an address nobody submitted.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::create_profile(db).await?;

    let repo = ProfileRepository::new(db);

    assert!(repo.find_by_email("nobody@purdue.edu").await?.is_none());

    Ok(())
}

/// Tests that a corrupt stored id surfaces as an internal error instead of a cast.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn fails_on_non_numeric_stored_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("not-a-snowflake")
        .email("x@purdue.edu")
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    let result = repo.find_by_email("x@purdue.edu").await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
