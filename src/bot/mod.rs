//! Discord bot integration.
//!
//! The bot answers text commands, drives the staged mod-update prompt through its
//! button and modal interactions, and tracks ticket channels created by the ticket
//! tool. Each gateway event is handled on its own task by serenity; handlers never
//! propagate errors, they log them and report them in the channel the event came
//! from.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive channel creation and deletion events
//! - `GUILD_MESSAGES` - Receive messages in guilds
//! - `GUILD_MEMBERS` - Resolve member roles and permissions (privileged intent)
//! - `MESSAGE_CONTENT` - Read command text (privileged intent)
//!
//! Note: privileged intents must be explicitly enabled in the Discord Developer
//! Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
pub mod ticket;
pub mod update;
