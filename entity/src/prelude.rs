pub use super::ticket::Entity as Ticket;
