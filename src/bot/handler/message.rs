use serenity::all::{Context, Message};

use crate::{
    bot::{command::Command, update},
    error::AppError,
    state::AppState,
};

/// Handle message creation in a channel
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(command) = Command::parse(&message.content) else {
        return;
    };

    tracing::debug!(
        "{:?} from {} in channel {}",
        command,
        message.author.id,
        message.channel_id
    );

    if let Err(e) = run_command(state, &ctx, &message, command).await {
        tracing::error!("Command failed in channel {}: {:?}", message.channel_id, e);

        if let Err(e) = message
            .reply(&ctx, format!("An error happened inside SkyAnswers, {}", e))
            .await
        {
            tracing::error!("Failed to report command error: {:?}", e);
        }
    }
}

async fn run_command(
    state: &AppState,
    ctx: &Context,
    message: &Message,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Update { url } => update::run_update(state, ctx, message, &url).await,
        Command::Repo => {
            message.reply(ctx, "it's `-update [dl url]` now").await?;
            Ok(())
        }
    }
}
