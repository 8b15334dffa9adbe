//! Inventory Service - book records and their copy-count invariants
//!
//! Every write checks the authorization gate first and validates the whole
//! input before touching storage, so a rejected call leaves no trace.

use serde::Deserialize;

use crate::domain::authorization::{self, Capability};
use crate::domain::{BookChanges, BookRepository, DomainError, NewBook, Principal, YesNo};
use crate::models::{Book, BookListing};
use crate::utils::form::{blank_as_none, optional_int};

/// Partial update of a book. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookUpdate {
    pub book_id: i32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_int")]
    pub copies_available: Option<i32>,
}

/// Trim and check every field of a new book. One aggregated message on failure.
pub fn validate_new_book(book: NewBook) -> Result<NewBook, DomainError> {
    let book = NewBook {
        title: book.title.trim().to_string(),
        isbn: book.isbn.trim().to_string(),
        shelf_location: book.shelf_location.trim().to_string(),
        ..book
    };

    let valid = !book.title.is_empty()
        && book.author_id > 0
        && book.category_id > 0
        && book.publisher_id > 0
        && !book.isbn.is_empty()
        && book.publish_year > 0
        && book.copies_total > 0
        && book.copies_available >= 0
        && book.copies_available <= book.copies_total
        && !book.shelf_location.is_empty();

    if !valid {
        return Err(DomainError::validation(
            "Please fill in all book fields correctly. Copies available cannot exceed total copies.",
        ));
    }

    Ok(book)
}

fn require_book_id(book_id: i32) -> Result<(), DomainError> {
    if book_id <= 0 {
        return Err(DomainError::validation("Please provide a valid book ID."));
    }
    Ok(())
}

pub async fn add_book(
    repo: &dyn BookRepository,
    principal: &Principal,
    book: NewBook,
) -> Result<Book, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    let book = validate_new_book(book)?;

    let created = repo.create(book).await.map_err(|e| match e {
        DomainError::Persistence(msg) => {
            tracing::error!("Failed to add book: {}", msg);
            DomainError::Persistence(format!("Failed to add book: {}", msg))
        }
        other => other,
    })?;

    tracing::info!("Book {} added by user {}", created.id, principal.user_id);
    Ok(created)
}

/// Applies only the supplied fields.
///
/// `copies_available` is checked for sign only; it is not compared against
/// `copies_total` here.
pub async fn update_book(
    repo: &dyn BookRepository,
    principal: &Principal,
    update: BookUpdate,
) -> Result<(), DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    require_book_id(update.book_id)?;

    // Blank title counts as not supplied
    let title = update
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    if let Some(copies) = update.copies_available
        && copies < 0
    {
        return Err(DomainError::validation(
            "Copies available cannot be negative.",
        ));
    }

    let changes = BookChanges {
        title,
        copies_available: update.copies_available,
    };

    if changes.is_empty() {
        return Err(DomainError::validation(
            "Nothing to update. Provide Title or Copies Available.",
        ));
    }

    repo.update(update.book_id, changes).await?;
    tracing::info!("Book {} updated by user {}", update.book_id, principal.user_id);
    Ok(())
}

/// Refuses while any borrowing of the book is Borrowed or Overdue.
pub async fn delete_book(
    repo: &dyn BookRepository,
    principal: &Principal,
    book_id: i32,
) -> Result<(), DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    require_book_id(book_id)?;

    if repo.count_outstanding_borrowings(book_id).await? > 0 {
        tracing::warn!("Refused to delete book {}: currently lent out", book_id);
        return Err(DomainError::Conflict(
            "Cannot delete book while it is borrowed or overdue.".to_string(),
        ));
    }

    repo.delete(book_id).await?;
    tracing::info!("Book {} deleted by user {}", book_id, principal.user_id);
    Ok(())
}

/// "Yes" while at least one borrowing of the book is outstanding.
pub async fn check_borrowed(repo: &dyn BookRepository, book_id: i32) -> Result<YesNo, DomainError> {
    if book_id <= 0 {
        return Err(DomainError::validation("Provide a valid book ID to check."));
    }

    let outstanding = repo.count_outstanding_borrowings(book_id).await?;
    Ok(YesNo::from(outstanding > 0))
}

/// "No" for unknown books as well as books with no copy on the shelf.
pub async fn check_available(
    repo: &dyn BookRepository,
    book_id: i32,
) -> Result<YesNo, DomainError> {
    if book_id <= 0 {
        return Err(DomainError::validation(
            "Provide a valid book ID to check availability.",
        ));
    }

    let book = repo.find_by_id(book_id).await?;
    Ok(YesNo::from(book.is_some_and(|b| b.copies_available > 0)))
}

pub async fn list_books(repo: &dyn BookRepository) -> Result<Vec<BookListing>, DomainError> {
    repo.find_all().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_book() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author_id: 1,
            category_id: 1,
            publisher_id: 1,
            isbn: "9780441013593".to_string(),
            publish_year: 1965,
            copies_total: 5,
            copies_available: 5,
            shelf_location: "A-1".to_string(),
        }
    }

    #[test]
    fn accepts_full_shelf_and_trims() {
        let book = validate_new_book(NewBook {
            title: "  Dune ".to_string(),
            ..valid_book()
        })
        .unwrap();
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn rejects_each_broken_field() {
        let broken = vec![
            NewBook { title: " ".into(), ..valid_book() },
            NewBook { author_id: 0, ..valid_book() },
            NewBook { category_id: -1, ..valid_book() },
            NewBook { publisher_id: 0, ..valid_book() },
            NewBook { isbn: "".into(), ..valid_book() },
            NewBook { publish_year: 0, ..valid_book() },
            NewBook { copies_total: 0, copies_available: 0, ..valid_book() },
            NewBook { copies_available: -1, ..valid_book() },
            NewBook { copies_available: 6, ..valid_book() },
            NewBook { shelf_location: "".into(), ..valid_book() },
        ];

        for book in broken {
            assert!(
                matches!(validate_new_book(book.clone()), Err(DomainError::Validation(_))),
                "expected rejection for {:?}",
                book
            );
        }
    }
}
