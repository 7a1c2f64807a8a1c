use sea_orm::DatabaseConnection;

use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{Ticket, TicketCategory, TicketState},
};

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts tracking a new ticket channel, waiting for its author to pick a category
    pub async fn open(&self, channel_id: u64) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo.upsert_awaiting(channel_id).await?;
        tracing::info!("Tracking ticket channel {}", channel_id);

        Ok(ticket)
    }

    /// Records the category picked for a ticket and opens it.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The opened ticket
    /// - `Err(AppError::BadRequest)` - Channel isn't a ticket, or was already categorized
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn categorize(
        &self,
        channel_id: u64,
        category: TicketCategory,
    ) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo
            .get_by_channel_id(channel_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("this channel isn't a ticket".to_string()))?;

        if ticket.state != TicketState::AwaitingCategory {
            return Err(AppError::BadRequest(
                "this ticket already has a category".to_string(),
            ));
        }

        let ticket = repo
            .update_state(channel_id, TicketState::Open, Some(category))
            .await?
            .ok_or_else(|| AppError::BadRequest("this channel isn't a ticket".to_string()))?;

        tracing::info!("Ticket {} opened as {}", channel_id, category);

        Ok(ticket)
    }

    /// Marks a ticket closed. Returns None if the channel was never tracked
    pub async fn close(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo
            .update_state(channel_id, TicketState::Closed, None)
            .await?;

        if ticket.is_some() {
            tracing::info!("Ticket {} closed", channel_id);
        }

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the full lifecycle of a ticket channel.
    ///
    /// Expected: awaiting → open with category → closed
    #[tokio::test]
    async fn lifecycle() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        let ticket = service.open(42).await?;
        assert_eq!(ticket.state, TicketState::AwaitingCategory);

        let ticket = service.categorize(42, TicketCategory::Crash).await?;
        assert_eq!(ticket.state, TicketState::Open);
        assert_eq!(ticket.category, Some(TicketCategory::Crash));

        let ticket = service.close(42).await?.unwrap();
        assert_eq!(ticket.state, TicketState::Closed);
        assert_eq!(ticket.category, Some(TicketCategory::Crash));

        Ok(())
    }

    /// Tests that a ticket can only be categorized once.
    ///
    /// Expected: Err(BadRequest), stored category unchanged
    #[tokio::test]
    async fn categorize_rejects_open_ticket() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::ticket::TicketFactory::new(db)
            .channel_id("55")
            .state("open")
            .category("mods")
            .build()
            .await?;

        let service = TicketService::new(db);
        let result = service.categorize(55, TicketCategory::Other).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let ticket = TicketRepository::new(db)
            .get_by_channel_id(55)
            .await?
            .unwrap();
        assert_eq!(ticket.category, Some(TicketCategory::Mods));

        Ok(())
    }

    /// Tests that closed tickets can't be reopened through the category prompt.
    #[tokio::test]
    async fn categorize_rejects_closed_ticket() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::ticket::TicketFactory::new(db)
            .channel_id("56")
            .state("closed")
            .build()
            .await?;

        let result = TicketService::new(db)
            .categorize(56, TicketCategory::Crash)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests categorizing a channel that was never tracked.
    #[tokio::test]
    async fn categorize_rejects_untracked_channel() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db)
            .categorize(999, TicketCategory::Crash)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests closing an untracked channel.
    ///
    /// Expected: Ok(None), nothing created
    #[tokio::test]
    async fn close_ignores_untracked_channel() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        assert!(service.close(1234).await?.is_none());
        assert!(TicketRepository::new(db)
            .get_by_channel_id(1234)
            .await?
            .is_none());

        Ok(())
    }
}
