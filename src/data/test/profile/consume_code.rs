use super::*;

/// Tests consuming the pending code.
///
/// Expected: Ok(true) and the profile is verified with the sentinel code
#[tokio::test]
async fn verifies_on_matching_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("5001")
        .code(424242)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);

    assert!(repo.consume_code(5001, 424242).await?);

    let profile = repo.get_by_id(5001).await?.unwrap();
    assert!(profile.status);
    assert_eq!(profile.code, NO_PENDING_CODE);
    assert!(profile.verified_at.is_some());

    Ok(())
}

/// Tests that a code can only be consumed once.
///
/// Expected: second call returns Ok(false)
#[tokio::test]
async fn second_consumption_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("5002")
        .code(515151)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);

    assert!(repo.consume_code(5002, 515151).await?);
    assert!(!repo.consume_code(5002, 515151).await?);

    Ok(())
}

/// Tests that a mismatching code leaves the profile unchanged.
///
/// Expected: Ok(false) and the original code still pending
#[tokio::test]
async fn mismatch_leaves_profile_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::ProfileFactory::new(db)
        .id("5003")
        .code(777888)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);

    assert!(!repo.consume_code(5003, 111111).await?);

    let profile = repo.get_by_id(5003).await?.unwrap();
    assert!(!profile.status);
    assert_eq!(profile.code, 777888);

    Ok(())
}

/// Tests that the sentinel can never be consumed as a code.
///
/// Expected: Ok(false) even for a verified profile holding the sentinel
#[tokio::test]
async fn sentinel_is_never_consumed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Profile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::profile::create_verified_profile(db, "5004").await?;

    let repo = ProfileRepository::new(db);

    assert!(!repo.consume_code(5004, NO_PENDING_CODE).await?);

    Ok(())
}
