//! Ticket data repository for database operations.
//!
//! Tracks support ticket channels and their lifecycle state. The repository only
//! records state; which transitions are allowed is decided by `TicketService`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::model::ticket::{Ticket, TicketCategory, TicketState};

/// Repository providing database operations for ticket tracking.
pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new TicketRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `TicketRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(&self, channel_id: u64) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// Gets the ticket tracked for a channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Ticket found for the channel
    /// - `Ok(None)` - Channel is not a tracked ticket
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, DbErr> {
        Ok(self.find_entity(channel_id).await?.map(Ticket::from_entity))
    }

    /// Creates or resets the ticket for a channel in the awaiting-category state.
    ///
    /// Discord can replay `channel_create` after a reconnect, so an existing record is
    /// reset rather than duplicated. `created_at` is preserved on reset.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created or reset ticket
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_awaiting(&self, channel_id: u64) -> Result<Ticket, DbErr> {
        let now = Utc::now();
        let awaiting = TicketState::AwaitingCategory.as_str().to_string();

        let entity = match self.find_entity(channel_id).await? {
            Some(existing) => {
                let mut active: entity::ticket::ActiveModel = existing.into();
                active.state = ActiveValue::Set(awaiting);
                active.category = ActiveValue::Set(None);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::ticket::ActiveModel {
                    id: ActiveValue::NotSet,
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    state: ActiveValue::Set(awaiting),
                    category: ActiveValue::Set(None),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(Ticket::from_entity(entity))
    }

    /// Updates the state and, when given, the category of a tracked ticket.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `state` - New lifecycle state
    /// - `category` - Category to record; `None` leaves the stored category unchanged
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The updated ticket
    /// - `Ok(None)` - Channel is not a tracked ticket
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_state(
        &self,
        channel_id: u64,
        state: TicketState,
        category: Option<TicketCategory>,
    ) -> Result<Option<Ticket>, DbErr> {
        let Some(existing) = self.find_entity(channel_id).await? else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.state = ActiveValue::Set(state.as_str().to_string());
        if let Some(category) = category {
            active.category = ActiveValue::Set(Some(category.as_str().to_string()));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Ticket::from_entity(active.update(self.db).await?)))
    }
}
