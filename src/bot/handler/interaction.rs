//! Interaction handler for buttons and modals.
//!
//! Every component and modal this bot issues is routed by its custom id. Errors are
//! logged and reported as a reply to the message the interaction belongs to.

use serenity::all::{ChannelId, Context, Interaction, Message};

use crate::{
    bot::{command::InteractionRoute, ticket, update},
    error::{internal::InternalError, AppError},
    state::AppState,
};

/// Handles the interaction_create event.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for responding
/// - `interaction` - The interaction from Discord
pub async fn handle_interaction_create(
    state: &AppState,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Component(component) => {
            let result = match InteractionRoute::parse(&component.data.custom_id) {
                Some(InteractionRoute::ConfirmModUpdate) => {
                    update::confirm(state, &ctx, &component).await
                }
                Some(InteractionRoute::EditModUpdate) => {
                    update::edit(state, &ctx, &component).await
                }
                Some(InteractionRoute::CategorizeTicket(category)) => {
                    ticket::categorize(state, &ctx, &component, category).await
                }
                _ => Err(
                    InternalError::UnknownInteraction(component.data.custom_id.clone()).into(),
                ),
            };

            if let Err(e) = result {
                report_error(&ctx, component.channel_id, Some(&*component.message), e).await;
            }
        }
        Interaction::Modal(modal) => {
            let result = match InteractionRoute::parse(&modal.data.custom_id) {
                Some(InteractionRoute::SubmitModUpdateEdit { prompt_id }) => {
                    update::submit_edit(state, &ctx, &modal, prompt_id).await
                }
                _ => {
                    Err(InternalError::UnknownInteraction(modal.data.custom_id.clone()).into())
                }
            };

            if let Err(e) = result {
                report_error(&ctx, modal.channel_id, modal.message.as_deref(), e).await;
            }
        }
        _ => {}
    }
}

async fn report_error(
    ctx: &Context,
    channel_id: ChannelId,
    message: Option<&Message>,
    error: AppError,
) {
    tracing::error!("Interaction failed in channel {}: {:?}", channel_id, error);

    let content = format!("An error happened inside SkyAnswers, {}", error);
    let sent = match message {
        Some(message) => message.reply(ctx, content).await,
        None => channel_id.say(ctx, content).await,
    };

    if let Err(e) = sent {
        tracing::error!("Failed to report interaction error: {:?}", e);
    }
}
