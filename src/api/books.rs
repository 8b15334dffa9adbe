use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::{ApiError, run};
use crate::domain::{NewBook, Principal};
use crate::infrastructure::AppState;
use crate::services::inventory_service::BookUpdate;
use crate::services::{Command, Outcome};
use crate::utils::form::{blank_as_none, optional_int};

/// Body of `PUT /books/:id`; blank fields mean "leave unchanged".
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_int")]
    pub copies_available: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books with author, category and publisher, by title")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::ListBooks).await
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book added"),
        (status = 400, description = "A field is missing or copies are inconsistent"),
        (status = 403, description = "Members cannot add books")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Json(book): Json<NewBook>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let outcome = run(&state, principal, Command::AddBook(book)).await?;
    Ok((StatusCode::CREATED, outcome))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Nothing to update or negative copies"),
        (status = 404, description = "No such book")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<Outcome>, ApiError> {
    let update = BookUpdate {
        book_id: id,
        title: payload.title,
        copies_available: payload.copies_available,
    };
    run(&state, principal, Command::UpdateBook(update)).await
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "No such book"),
        (status = 409, description = "Book is currently lent out")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Path(id): Path<i32>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::DeleteBook { book_id: id }).await
}

#[utoipa::path(
    get,
    path = "/api/books/{id}/borrowed",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 200, description = "Yes while a borrowing is outstanding"))
)]
pub async fn is_borrowed(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Path(id): Path<i32>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::CheckBookBorrowed { book_id: id }).await
}

#[utoipa::path(
    get,
    path = "/api/books/{id}/available",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 200, description = "Yes when at least one copy is on the shelf"))
)]
pub async fn is_available(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Path(id): Path<i32>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::CheckBookAvailable { book_id: id }).await
}
