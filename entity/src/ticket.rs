use sea_orm::entity::prelude::*;

/// Role request ticket backed by a private guild channel.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    /// Discord channel id of the ticket channel.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub role: String,
    /// `true` while the ticket is open.
    pub status: bool,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub opened_at: DateTimeUtc,
    pub closed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
