//! Discord side of the ticket tracker.

use std::time::Duration;

use serenity::all::{
    ButtonStyle, ChannelType, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, GuildChannel,
};

use crate::{
    bot::command::categorize_id, error::AppError, model::ticket::TicketCategory,
    service::ticket::TicketService, state::AppState,
};

/// Channel name prefix used by the ticket tool.
const TICKET_CHANNEL_PREFIX: &str = "ticket-";

/// Gives the ticket tool time to set up channel permissions before we post.
const CATEGORY_PROMPT_DELAY: Duration = Duration::from_secs(1);

const CATEGORY_PROMPT: &str = "What is your ticket about? You must click on one to continue.";

pub fn is_ticket_channel(kind: ChannelType, name: &str) -> bool {
    kind == ChannelType::Text && name.starts_with(TICKET_CHANNEL_PREFIX)
}

/// Starts tracking a new ticket channel and asks its author for a category.
pub async fn prompt_for_category(
    state: &AppState,
    ctx: &Context,
    channel: &GuildChannel,
) -> Result<(), AppError> {
    tokio::time::sleep(CATEGORY_PROMPT_DELAY).await;

    TicketService::new(&state.db).open(channel.id.get()).await?;

    channel
        .send_message(
            ctx,
            CreateMessage::new()
                .content(CATEGORY_PROMPT)
                .components(vec![CreateActionRow::Buttons(category_buttons())]),
        )
        .await?;

    Ok(())
}

/// Handles a category button press, opening the ticket.
pub async fn categorize(
    state: &AppState,
    ctx: &Context,
    interaction: &ComponentInteraction,
    category: TicketCategory,
) -> Result<(), AppError> {
    TicketService::new(&state.db)
        .categorize(interaction.channel_id.get(), category)
        .await?;

    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(format!(
                        "Got it: {}. Someone will be with you soon.",
                        category.label()
                    ))
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

fn category_buttons() -> Vec<CreateButton> {
    TicketCategory::ALL
        .into_iter()
        .map(|category| {
            let style = match category {
                TicketCategory::Other => ButtonStyle::Secondary,
                _ => ButtonStyle::Primary,
            };

            CreateButton::new(categorize_id(category))
                .label(category.label())
                .style(style)
        })
        .collect()
}
