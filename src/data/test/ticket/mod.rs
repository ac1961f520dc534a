use crate::{
    data::{is_unique_violation, ticket::TicketRepository, TicketStore},
    error::{ticket::TicketError, AppError},
    model::ticket::{CreateTicketParam, UpdateTicketParam},
};
use test_utils::{builder::TestBuilder, factory};

mod close_if_open;
mod find_open_by_owner;
