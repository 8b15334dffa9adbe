use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "borrowings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub status: String, // 'Borrowed', 'Overdue', 'Returned'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Member,
    #[sea_orm(has_many = "super::fine::Entity")]
    Fine,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::fine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle of a borrowing as stored in `borrowings.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowStatus {
    Borrowed,
    Overdue,
    Returned,
}

impl BorrowStatus {
    /// Statuses meaning the copy has not come back yet.
    pub const OUTSTANDING: [BorrowStatus; 2] = [BorrowStatus::Borrowed, BorrowStatus::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Borrowed => "Borrowed",
            BorrowStatus::Overdue => "Overdue",
            BorrowStatus::Returned => "Returned",
        }
    }
}
