use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub borrow_id: i32,
    pub amount: f64,
    pub paid: String, // 'Yes' / 'No'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::borrowing::Entity",
        from = "Column::BorrowId",
        to = "super::borrowing::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Borrowing,
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const PAID: &str = "Yes";
pub const UNPAID: &str = "No";
