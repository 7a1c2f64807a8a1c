use super::*;

/// Tests retrieving a ticket by channel ID.
///
/// Verifies that the repository returns the ticket tracked for the channel with its
/// stored state and category.
///
/// Expected: Ok(Some(ticket))
#[tokio::test]
async fn returns_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("123456789")
        .state("open")
        .category("crash")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let result = repo.get_by_channel_id(123456789).await;

    assert!(result.is_ok());
    let ticket = result.unwrap();
    assert!(ticket.is_some());
    let ticket = ticket.unwrap();
    assert_eq!(ticket.channel_id, "123456789");
    assert_eq!(ticket.state, TicketState::Open);
    assert_eq!(ticket.category, Some(TicketCategory::Crash));

    Ok(())
}

/// Tests retrieving an untracked channel.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_untracked_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db).await?;

    let repo = TicketRepository::new(db);
    let result = repo.get_by_channel_id(999999999).await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());

    Ok(())
}

/// Tests that unknown stored values don't fail the query.
///
/// Verifies that a row with an unrecognized state is read back as closed and an
/// unrecognized category is dropped.
///
/// Expected: Ok(Some(ticket)) with state Closed and no category
#[tokio::test]
async fn tolerates_unknown_stored_values() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("42")
        .state("locked")
        .category("billing")
        .build()
        .await?;

    let ticket = TicketRepository::new(db)
        .get_by_channel_id(42)
        .await?
        .unwrap();

    assert_eq!(ticket.state, TicketState::Closed);
    assert_eq!(ticket.category, None);

    Ok(())
}
