use sea_orm_migration::{prelude::*, schema::*};

/// Enforces at most one open ticket per owner at the storage layer.
///
/// Written as raw SQL because the schema builder has no partial index support. The
/// statement is valid for both SQLite and Postgres.
pub const OPEN_TICKET_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_ticket_owner_open ON ticket (owner_id) WHERE status";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(string(Ticket::Id).primary_key())
                    .col(string(Ticket::OwnerId))
                    .col(string(Ticket::Role))
                    .col(boolean(Ticket::Status).default(true))
                    .col(text(Ticket::Content).default(""))
                    .col(timestamp_with_time_zone(Ticket::OpenedAt))
                    .col(timestamp_with_time_zone_null(Ticket::ClosedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(OPEN_TICKET_INDEX_SQL)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    OwnerId,
    Role,
    Status,
    Content,
    OpenedAt,
    ClosedAt,
}
