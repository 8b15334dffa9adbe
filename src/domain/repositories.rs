//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::Deserialize;

use super::DomainError;
use crate::models::{Book, BookListing};

/// Fields for a new catalogue entry, validated by the inventory service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBook {
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

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub copies_available: Option<i32>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.copies_available.is_none()
    }
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books with author, category and publisher names, ordered by title
    async fn find_all(&self) -> Result<Vec<BookListing>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Insert a new book
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Apply the supplied fields in one statement. `NotFound` if no row matched.
    async fn update(&self, id: i32, changes: BookChanges) -> Result<(), DomainError>;

    /// Delete a book by ID. `NotFound` if no row was removed.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Number of borrowings for this book still Borrowed or Overdue
    async fn count_outstanding_borrowings(&self, id: i32) -> Result<u64, DomainError>;
}
