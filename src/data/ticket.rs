//! Ticket repository for database operations.
//!
//! This module provides the `TicketRepository` for managing role request tickets. Closed
//! tickets are never deleted; they remain as an audit trail of transcripts.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    data::TicketStore,
    error::{ticket::TicketError, AppError},
    model::ticket::{CreateTicketParam, Ticket, UpdateTicketParam},
};

/// Repository providing database operations for tickets.
pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new TicketRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `TicketRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> TicketStore for TicketRepository<'a> {
    /// Finds a ticket by its channel id.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Ticket found, open or closed
    /// - `Ok(None)` - Channel is not a ticket
    /// - `Err(AppError)` - Database error or corrupt stored id
    async fn get_by_id(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Persists a newly opened ticket with an empty transcript.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::DbErr)` - Database error, including a unique violation from the
    ///   one-open-ticket-per-owner index
    async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        let entity = entity::ticket::ActiveModel {
            id: ActiveValue::Set(param.id.to_string()),
            owner_id: ActiveValue::Set(param.owner_id.to_string()),
            role: ActiveValue::Set(param.role),
            status: ActiveValue::Set(true),
            content: ActiveValue::Set(String::new()),
            opened_at: ActiveValue::Set(Utc::now()),
            closed_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Applies the provided fields to an open ticket.
    ///
    /// Setting `status` to `false` also stamps `closed_at`. The UPDATE is filtered on
    /// `status = true`, so a closed ticket can neither be reopened nor have its transcript
    /// rewritten.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The updated ticket
    /// - `Ok(None)` - No ticket exists for the channel
    /// - `Err(TicketError::TicketAlreadyClosed)` - Ticket was closed before the update
    /// - `Err(AppError)` - Database error during update
    async fn update(
        &self,
        channel_id: u64,
        param: UpdateTicketParam,
    ) -> Result<Option<Ticket>, AppError> {
        let Some(current) = self.get_by_id(channel_id).await? else {
            return Ok(None);
        };

        if param.status.is_none() && param.content.is_none() {
            return Ok(Some(current));
        }
        if !current.status {
            return Err(TicketError::TicketAlreadyClosed(channel_id).into());
        }

        let mut query = entity::prelude::Ticket::update_many()
            .filter(entity::ticket::Column::Id.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(true));

        if let Some(status) = param.status {
            query = query.col_expr(entity::ticket::Column::Status, Expr::value(status));
            if !status {
                query = query.col_expr(
                    entity::ticket::Column::ClosedAt,
                    Expr::value(Utc::now()),
                );
            }
        }
        if let Some(content) = param.content {
            query = query.col_expr(entity::ticket::Column::Content, Expr::value(content));
        }

        let result = query.exec(self.db).await?;

        // Closed concurrently between the read and the write.
        if result.rows_affected == 0 {
            return Err(TicketError::TicketAlreadyClosed(channel_id).into());
        }

        self.get_by_id(channel_id).await
    }

    /// Gets the open tickets owned by a member, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Ticket>)` - Open tickets, empty if none
    /// - `Err(AppError)` - Database error during query
    async fn find_open_by_owner(&self, owner_id: u64) -> Result<Vec<Ticket>, AppError> {
        let entities = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::OwnerId.eq(owner_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(true))
            .order_by_asc(entity::ticket::Column::OpenedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Ticket::from_entity).collect()
    }

    /// Closes an open ticket and stores its transcript.
    ///
    /// Runs as a single conditional UPDATE so a transcript is written at most once.
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket closed
    /// - `Ok(false)` - Ticket missing or already closed
    /// - `Err(AppError)` - Database error during update
    async fn close_if_open(&self, channel_id: u64, content: String) -> Result<bool, AppError> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::Status, Expr::value(false))
            .col_expr(entity::ticket::Column::Content, Expr::value(content))
            .col_expr(entity::ticket::Column::ClosedAt, Expr::value(Utc::now()))
            .filter(entity::ticket::Column::Id.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
