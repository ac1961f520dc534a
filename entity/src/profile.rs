use sea_orm::entity::prelude::*;

/// Student profile created when a member first requests email verification.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    /// Discord user id of the member.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    /// Last submitted address, lower-cased.
    pub email: String,
    /// Pending one-time code, `0` when none is pending.
    pub code: i32,
    pub status: bool,
    pub created_at: DateTimeUtc,
    pub verified_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
