use super::*;

/// Tests that only the owner's open tickets are returned.
///
/// Expected: Ok with the single open ticket, closed history and other owners excluded
#[tokio::test]
async fn returns_only_open_tickets_of_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .owner_id("42")
        .closed("old transcript")
        .build()
        .await?;
    let open = factory::ticket::TicketFactory::new(db)
        .id("9301")
        .owner_id("42")
        .build()
        .await?;
    factory::ticket::create_ticket(db, "43").await?;

    let repo = TicketRepository::new(db);
    let tickets = repo.find_open_by_owner(42).await?;

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id.to_string(), open.id);

    Ok(())
}

/// Tests an owner without tickets.
///
/// Expected: Ok with an empty vector
#[tokio::test]
async fn returns_empty_for_owner_without_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    assert!(repo.find_open_by_owner(42).await?.is_empty());

    Ok(())
}
