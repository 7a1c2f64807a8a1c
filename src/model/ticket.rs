//! Domain models for support ticket tracking.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Lifecycle of a ticket channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    /// Channel created, author hasn't picked a category yet.
    AwaitingCategory,
    /// Categorized and open for triage.
    Open,
    /// Channel deleted or otherwise closed.
    Closed,
}

impl TicketState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingCategory => "awaiting_category",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for TicketState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting_category" => Ok(Self::AwaitingCategory),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown ticket state '{}'", other)),
        }
    }
}

/// Triage categories offered when a ticket is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCategory {
    Crash,
    Install,
    Mods,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 4] = [Self::Crash, Self::Install, Self::Mods, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crash => "crash",
            Self::Install => "install",
            Self::Mods => "mods",
            Self::Other => "other",
        }
    }

    /// Button label shown in the category prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Crash => "I'm crashing",
            Self::Install => "I need help with the installer",
            Self::Mods => "I need help with mods",
            Self::Other => "Something else (meta)",
        }
    }
}

impl FromStr for TicketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown ticket category '{}'", s))
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Support ticket tracked for a Discord channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    /// Discord channel ID (stored as String).
    pub channel_id: String,
    pub state: TicketState,
    pub category: Option<TicketCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    ///
    /// Unknown state or category strings are treated as a closed ticket without a
    /// category rather than failing the whole query.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ticket` - The converted ticket domain model
    pub fn from_entity(entity: entity::ticket::Model) -> Self {
        Self {
            id: entity.id,
            channel_id: entity.channel_id,
            state: entity.state.parse().unwrap_or(TicketState::Closed),
            category: entity.category.and_then(|c| c.parse().ok()),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
