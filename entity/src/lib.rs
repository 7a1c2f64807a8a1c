//! SeaORM entity definitions for the bot's persisted state.

pub mod prelude;

pub mod ticket;
