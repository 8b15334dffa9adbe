use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalogue entry. `0 <= copies_available <= copies_total` holds on creation;
/// updates only guarantee the lower bound.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub category_id: i32,
    pub publisher_id: i32,
    pub isbn: String,
    pub publish_year: i32,
    pub copies_total: i32,
    pub copies_available: i32,
    pub shelf_location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::publisher::Entity",
        from = "Column::PublisherId",
        to = "super::publisher::Column::Id"
    )]
    Publisher,
    #[sea_orm(has_many = "super::borrowing::Entity")]
    Borrowing,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::publisher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Publisher.def()
    }
}

impl Related<super::borrowing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrowing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub category_id: i32,
    pub publisher_id: i32,
    pub isbn: String,
    pub publish_year: i32,
    pub copies_total: i32,
    pub copies_available: i32,
    pub shelf_location: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author_id: model.author_id,
            category_id: model.category_id,
            publisher_id: model.publisher_id,
            isbn: model.isbn,
            publish_year: model.publish_year,
            copies_total: model.copies_total,
            copies_available: model.copies_available,
            shelf_location: model.shelf_location,
        }
    }
}

/// Book row joined with its author, category and publisher names.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct BookListing {
    pub book_id: i32,
    pub title: String,
    pub author_name: String,
    pub category_name: String,
    pub publisher_name: String,
    pub isbn: String,
    pub publish_year: i32,
    pub copies_total: i32,
    pub copies_available: i32,
    pub shelf_location: String,
}
