//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's event handlers and the data layer. They implement
//! the workflow rules (who may update what, when a ticket may change state) and work
//! with domain models rather than entities or Discord types.

pub mod mod_update;
pub mod ticket;
