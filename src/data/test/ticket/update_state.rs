use super::*;

/// Tests recording a category and opening the ticket.
///
/// Expected: Ok(Some(ticket)) with state Open and the category set
#[tokio::test]
async fn sets_state_and_category() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("777")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let ticket = repo
        .update_state(777, TicketState::Open, Some(TicketCategory::Install))
        .await?;

    assert!(ticket.is_some());
    let ticket = ticket.unwrap();
    assert_eq!(ticket.state, TicketState::Open);
    assert_eq!(ticket.category, Some(TicketCategory::Install));

    Ok(())
}

/// Tests that a state change without a category keeps the stored one.
///
/// Expected: Ok(Some(ticket)) with state Closed and the original category
#[tokio::test]
async fn preserves_category_when_not_given() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("888")
        .state("open")
        .category("other")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let ticket = repo
        .update_state(888, TicketState::Closed, None)
        .await?
        .unwrap();

    assert_eq!(ticket.state, TicketState::Closed);
    assert_eq!(ticket.category, Some(TicketCategory::Other));

    Ok(())
}

/// Tests updating an untracked channel.
///
/// Expected: Ok(None) and no record created
#[tokio::test]
async fn returns_none_for_untracked_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo.update_state(999, TicketState::Closed, None).await?;

    assert!(result.is_none());

    let count = entity::prelude::Ticket::find().count(db).await?;
    assert_eq!(count, 0);

    Ok(())
}
