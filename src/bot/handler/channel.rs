//! Channel event handlers for ticket tracking.
//!
//! The ticket tool creates one text channel per ticket, named `ticket-*`, and deletes
//! it when the ticket is closed. These handlers follow that lifecycle; all other
//! channels are ignored.

use serenity::all::{Context, GuildChannel, Message};

use crate::{bot::ticket, service::ticket::TicketService, state::AppState};

/// Handles the channel_create event when a channel is created in a guild.
///
/// Starts tracking ticket channels and posts the category prompt in them.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for posting the prompt
/// - `channel` - The newly created guild channel from Discord
pub async fn handle_channel_create(state: &AppState, ctx: Context, channel: GuildChannel) {
    if !ticket::is_ticket_channel(channel.kind, &channel.name) {
        tracing::debug!(
            "Ignoring channel {} (type: {:?}) in guild {}",
            channel.name,
            channel.kind,
            channel.guild_id
        );
        return;
    }

    if let Err(e) = ticket::prompt_for_category(state, &ctx, &channel).await {
        tracing::error!(
            "Failed to set up ticket channel {} in guild {}: {:?}",
            channel.name,
            channel.guild_id,
            e
        );
    }
}

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// Marks the ticket closed if the channel was a tracked ticket.
///
/// # Arguments
/// - `state` - Shared application state
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel
/// - `_messages` - Cached messages from the channel if available (unused)
pub async fn handle_channel_delete(
    state: &AppState,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    if let Err(e) = TicketService::new(&state.db).close(channel.id.get()).await {
        tracing::error!(
            "Failed to close ticket for channel {} in guild {}: {:?}",
            channel.name,
            channel.guild_id,
            e
        );
    }
}
