//! Ticket factory for creating test role request tickets.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// Defaults describe an open ticket with an empty transcript.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    owner_id: String,
    role: String,
    status: bool,
    content: String,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - id: auto-incremented channel id
    /// - owner_id: auto-incremented member id
    /// - role: `"Player"`
    /// - status: `true`
    /// - content: empty
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: next_id().to_string(),
            owner_id: next_id().to_string(),
            role: "Player".to_string(),
            status: true,
            content: String::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Marks the ticket as closed with the given transcript.
    pub fn closed(mut self, content: impl Into<String>) -> Self {
        self.status = false;
        self.content = content.into();
        self
    }

    /// Builds and inserts the ticket entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ticket::Model)` - Created ticket entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now();
        entity::ticket::ActiveModel {
            id: ActiveValue::Set(self.id),
            owner_id: ActiveValue::Set(self.owner_id),
            role: ActiveValue::Set(self.role),
            status: ActiveValue::Set(self.status),
            content: ActiveValue::Set(self.content),
            opened_at: ActiveValue::Set(now),
            closed_at: ActiveValue::Set((!self.status).then_some(now)),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket owned by the given member.
pub async fn create_ticket(
    db: &DatabaseConnection,
    owner_id: impl Into<String>,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db).owner_id(owner_id).build().await
}
