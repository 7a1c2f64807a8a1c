use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{TicketCategory, TicketState},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod get_by_channel_id;
mod update_state;
mod upsert_awaiting;
