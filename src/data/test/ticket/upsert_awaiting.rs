use super::*;

/// Tests creating a new ticket record.
///
/// Verifies that a fresh channel is recorded as awaiting a category and not open.
///
/// Expected: Ok with new record created
#[tokio::test]
async fn creates_new_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.upsert_awaiting(123456789).await?;

    assert_eq!(ticket.channel_id, "123456789");
    assert_eq!(ticket.state, TicketState::AwaitingCategory);
    assert_eq!(ticket.category, None);

    let count = entity::prelude::Ticket::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that a replayed channel creation resets the existing record.
///
/// Verifies that the same record is reused, the category is cleared, and the
/// creation timestamp is preserved.
///
/// Expected: Ok with the original record reset
#[tokio::test]
async fn resets_existing_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::ticket::TicketFactory::new(db)
        .channel_id("555")
        .state("open")
        .category("mods")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let ticket = repo.upsert_awaiting(555).await?;

    assert_eq!(ticket.id, original.id);
    assert_eq!(ticket.state, TicketState::AwaitingCategory);
    assert_eq!(ticket.category, None);
    assert_eq!(ticket.created_at, original.created_at);

    let count = entity::prelude::Ticket::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests upserting different channels.
///
/// Expected: Ok with separate records for each channel
#[tokio::test]
async fn creates_separate_records_for_different_channels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let first = repo.upsert_awaiting(111).await?;
    let second = repo.upsert_awaiting(222).await?;

    assert_ne!(first.id, second.id);

    let count = entity::prelude::Ticket::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
