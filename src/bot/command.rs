//! Text commands and component custom ids understood by the bot.

use crate::{model::ticket::TicketCategory, util::parse::split_custom_id};

pub const CONFIRM_MOD_UPDATE: &str = "confirmModUpdate";
pub const EDIT_MOD_UPDATE: &str = "editModUpdate";
pub const MOD_UPDATE_EDIT_MODAL: &str = "modUpdateEdit";
pub const TICKET_CATEGORIZE: &str = "ticketCategorize";

/// A text command parsed from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `-update <url>`: propose updating a mod from a download URL.
    Update { url: String },
    /// `-repo`, replaced by `-update`.
    Repo,
}

impl Command {
    /// Parses a message's content.
    ///
    /// Command names are case-insensitive; the URL keeps its original case since
    /// download hosts often aren't.
    ///
    /// # Returns
    /// - `Some(Command)` - Message is a known command
    /// - `None` - Anything else, including `-update` without a URL
    pub fn parse(content: &str) -> Option<Self> {
        let content = content.trim();
        let (name, rest) = match content.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (content, ""),
        };

        match name.to_lowercase().as_str() {
            "-update" if !rest.is_empty() => Some(Self::Update {
                url: rest.to_string(),
            }),
            "-repo" if rest.is_empty() => Some(Self::Repo),
            _ => None,
        }
    }
}

/// An interaction routed by its custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRoute {
    ConfirmModUpdate,
    EditModUpdate,
    /// Edit form submitted for the prompt with this message id.
    SubmitModUpdateEdit { prompt_id: u64 },
    CategorizeTicket(TicketCategory),
}

impl InteractionRoute {
    /// Parses a component or modal custom id.
    ///
    /// # Returns
    /// - `Some(InteractionRoute)` - An id this bot issues
    /// - `None` - Unknown id or malformed argument
    pub fn parse(custom_id: &str) -> Option<Self> {
        match split_custom_id(custom_id) {
            (CONFIRM_MOD_UPDATE, None) => Some(Self::ConfirmModUpdate),
            (EDIT_MOD_UPDATE, None) => Some(Self::EditModUpdate),
            (MOD_UPDATE_EDIT_MODAL, Some(prompt_id)) => prompt_id
                .parse()
                .ok()
                .map(|prompt_id| Self::SubmitModUpdateEdit { prompt_id }),
            (TICKET_CATEGORIZE, Some(category)) => {
                category.parse().ok().map(Self::CategorizeTicket)
            }
            _ => None,
        }
    }
}

/// Custom id of the edit form for a prompt.
pub fn edit_modal_id(prompt_id: u64) -> String {
    format!("{}|{}", MOD_UPDATE_EDIT_MODAL, prompt_id)
}

/// Custom id of a ticket category button.
pub fn categorize_id(category: TicketCategory) -> String {
    format!("{}|{}", TICKET_CATEGORIZE, category)
}
