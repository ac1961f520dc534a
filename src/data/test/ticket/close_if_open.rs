use super::*;

/// Tests closing an open ticket.
///
/// Expected: Ok(true) with transcript stored and status false
#[tokio::test]
async fn closes_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .id("9401")
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(repo.close_if_open(9401, "pete: hi\nofficer: ok".to_string()).await?);

    let ticket = repo.get_by_id(9401).await?.unwrap();
    assert!(!ticket.status);
    assert_eq!(ticket.content, "pete: hi\nofficer: ok");
    assert!(ticket.closed_at.is_some());

    Ok(())
}

/// Tests that a closed ticket's transcript is never overwritten.
///
/// Expected: Ok(false) and original content preserved
#[tokio::test]
async fn never_overwrites_transcript() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .id("9402")
        .closed("original")
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(!repo.close_if_open(9402, "replacement".to_string()).await?);

    let ticket = repo.get_by_id(9402).await?.unwrap();
    assert_eq!(ticket.content, "original");

    Ok(())
}

/// Tests closing a channel that is not a ticket.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    assert!(!repo.close_if_open(9403, String::new()).await?);

    Ok(())
}
