//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, Set, Statement,
};

use crate::domain::{BookChanges, BookRepository, DomainError, NewBook};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};
use crate::models::borrowing::{self, BorrowStatus, Entity as BorrowingEntity};
use crate::models::{Book, BookListing};

const LIST_BOOKS_SQL: &str = r#"
    SELECT
        b.id AS book_id,
        b.title,
        a.name AS author_name,
        c.name AS category_name,
        p.name AS publisher_name,
        b.isbn,
        b.publish_year,
        b.copies_total,
        b.copies_available,
        b.shelf_location
    FROM books b
    JOIN authors a ON b.author_id = a.id
    JOIN categories c ON b.category_id = c.id
    JOIN publishers p ON b.publisher_id = p.id
    ORDER BY b.title, b.id
"#;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<BookListing>, DomainError> {
        let stmt =
            Statement::from_string(self.db.get_database_backend(), LIST_BOOKS_SQL.to_owned());
        let books = BookListing::find_by_statement(stmt).all(&self.db).await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let new_book = ActiveModel {
            title: Set(book.title),
            author_id: Set(book.author_id),
            category_id: Set(book.category_id),
            publisher_id: Set(book.publisher_id),
            isbn: Set(book.isbn),
            publish_year: Set(book.publish_year),
            copies_total: Set(book.copies_total),
            copies_available: Set(book.copies_available),
            shelf_location: Set(book.shelf_location),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        Ok(Book::from(result))
    }

    async fn update(&self, id: i32, changes: BookChanges) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("Nothing to update."));
        }

        let mut update = BookEntity::update_many().filter(Column::Id.eq(id));

        if let Some(title) = changes.title {
            update = update.col_expr(Column::Title, Expr::value(title));
        }
        if let Some(copies) = changes.copies_available {
            update = update.col_expr(Column::CopiesAvailable, Expr::value(copies));
        }

        let result = update.exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("No book found with ID {}", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("No book found with ID {}", id)));
        }

        Ok(())
    }

    async fn count_outstanding_borrowings(&self, id: i32) -> Result<u64, DomainError> {
        let outstanding = BorrowStatus::OUTSTANDING.map(|s| s.as_str());

        let count = BorrowingEntity::find()
            .filter(borrowing::Column::BookId.eq(id))
            .filter(borrowing::Column::Status.is_in(outstanding))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
