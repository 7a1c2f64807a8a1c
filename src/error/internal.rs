use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A component or modal carried a custom id this bot never issues.
    #[error("Unknown interaction id '{0}'")]
    UnknownInteraction(String),
}
