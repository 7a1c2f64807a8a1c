//! Error types for the bot.
//!
//! `AppError` is the top-level error that wraps domain-specific errors. Event handlers
//! never propagate it to serenity: they log it and report it back to the user in the
//! channel the event came from.

pub mod config;
pub mod internal;
pub mod update;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, update::UpdateError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Failure in the mod update workflow. The message is safe to show to users.
    #[error(transparent)]
    UpdateErr(#[from] UpdateError),

    /// Internal issue indicating a bug rather than bad input.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Invalid request from a Discord user.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
