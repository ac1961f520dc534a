use super::*;
use crate::model::ticket::{CreateTicketParam, Ticket, UpdateTicketParam};

/// Tests opening a ticket for a member without one.
///
/// Expected: open ticket bound to a new channel, prompt posted, TicketOpen audited
#[tokio::test]
async fn opens_ticket_with_private_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tickets = TicketRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let ticket = service.open(request(3001, "Player")).await?;

    assert!(ticket.status);
    assert!(ticket.content.is_empty());
    assert_eq!(ticket.owner_id, 3001);
    assert_eq!(ticket.role, "Player");
    assert_eq!(fakes.directory.created_channels(), vec![ticket.id]);

    let sent = fakes.directory.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, ticket.id);
    assert!(sent[0].1.close_ticket_button);

    let stored = tickets.get_by_id(ticket.id).await?.unwrap();
    assert!(stored.status);
    assert_eq!(stored.owner_id, 3001);
    assert_eq!(fakes.audit.count(AuditKind::TicketOpen), 1);

    Ok(())
}

/// Tests a second request while the first ticket is still open.
///
/// Expected: Err(TicketAlreadyOpen) naming the open ticket, no new channel
#[tokio::test]
async fn rejects_second_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tickets = TicketRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let first = service.open(request(3002, "Coach")).await?;
    let result = service.open(request(3002, "Player")).await;

    match result {
        Err(AppError::TicketErr(TicketError::TicketAlreadyOpen {
            owner_id,
            ticket_id,
        })) => {
            assert_eq!(owner_id, 3002);
            assert_eq!(ticket_id, Some(first.id));
        }
        other => panic!("expected TicketAlreadyOpen, got {:?}", other),
    }
    assert_eq!(fakes.directory.created_channels().len(), 1);

    Ok(())
}

/// Tests that closed tickets of the member do not block a new request.
///
/// Expected: Ok after the earlier ticket was closed
#[tokio::test]
async fn reopens_after_close() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tickets = TicketRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let first = service.open(request(3003, "Coach")).await?;
    service.close(first.id).await?;

    let second = service.open(request(3003, "Player")).await?;

    assert_ne!(first.id, second.id);
    assert!(second.status);
    assert_eq!(tickets.find_open_by_owner(3003).await?.len(), 1);

    Ok(())
}

/// Tests two requests of the same member racing each other.
///
/// Expected: one ticket open, every channel of the losing request removed again
#[tokio::test]
async fn concurrent_opens_leave_one_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tickets = TicketRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let (first, second) = tokio::join!(
        service.open(request(3004, "Coach")),
        service.open(request(3004, "Player"))
    );

    assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
    let failure = if first.is_ok() { second } else { first };
    assert!(matches!(
        failure,
        Err(AppError::TicketErr(TicketError::TicketAlreadyOpen { .. }))
    ));

    let created = fakes.directory.created_channels().len();
    let deleted = fakes.directory.deleted_channels().len();
    assert_eq!(created - deleted, 1);
    assert_eq!(tickets.find_open_by_owner(3004).await?.len(), 1);

    Ok(())
}

/// Tests that other members are unaffected by an open ticket.
///
/// Expected: Ok for a different owner
#[tokio::test]
async fn open_ticket_of_other_member_does_not_block() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_ticket(db, "3005").await?;

    let tickets = TicketRepository::new(db);
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let ticket = service.open(request(3006, "Coach")).await?;

    assert_eq!(ticket.owner_id, 3006);

    Ok(())
}

/// Ticket store whose open-ticket lookup never sees anything, like a reader racing a
/// writer that has not committed yet.
struct HiddenOpenTickets<'a> {
    inner: TicketRepository<'a>,
}

#[async_trait::async_trait]
impl TicketStore for HiddenOpenTickets<'_> {
    async fn get_by_id(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        self.inner.get_by_id(channel_id).await
    }

    async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        self.inner.create(param).await
    }

    async fn update(
        &self,
        channel_id: u64,
        param: UpdateTicketParam,
    ) -> Result<Option<Ticket>, AppError> {
        self.inner.update(channel_id, param).await
    }

    async fn find_open_by_owner(&self, _owner_id: u64) -> Result<Vec<Ticket>, AppError> {
        Ok(Vec::new())
    }

    async fn close_if_open(&self, channel_id: u64, content: String) -> Result<bool, AppError> {
        self.inner.close_if_open(channel_id, content).await
    }
}

/// Tests losing the insert race against a ticket that cannot be read back.
///
/// Expected: Err(TicketAlreadyOpen) without a ticket id, new channel removed again
#[tokio::test]
async fn unreadable_winner_reports_unknown_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_ticket(db, "3006").await?;

    let tickets = HiddenOpenTickets {
        inner: TicketRepository::new(db),
    };
    let fakes = Fakes::new();
    let service = fakes.ticket_service(&tickets);

    let result = service.open(request(3006, "Player")).await;

    assert!(matches!(
        result,
        Err(AppError::TicketErr(TicketError::TicketAlreadyOpen {
            owner_id: 3006,
            ticket_id: None,
        }))
    ));
    assert_eq!(fakes.directory.created_channels().len(), 1);
    assert_eq!(
        fakes.directory.created_channels(),
        fakes.directory.deleted_channels()
    );

    Ok(())
}
