pub use super::profile::Entity as Profile;
pub use super::ticket::Entity as Ticket;
