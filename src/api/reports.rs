use axum::{Json, extract::State};

use super::{ApiError, run};
use crate::domain::Principal;
use crate::infrastructure::AppState;
use crate::services::{Command, Outcome};

#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    responses((status = 200, description = "Borrowing and fine totals per month, newest first"))
)]
pub async fn monthly_summary(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::BorrowingSummary).await
}

#[utoipa::path(
    get,
    path = "/api/reports/popular-books",
    responses((status = 200, description = "Two most borrowed books"))
)]
pub async fn popular_books(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::PopularBooks).await
}

#[utoipa::path(
    get,
    path = "/api/reports/top-authors",
    responses((status = 200, description = "Two most borrowed authors"))
)]
pub async fn top_authors(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::TopAuthors).await
}

#[utoipa::path(
    get,
    path = "/api/reports/active-members",
    responses((status = 200, description = "Two members with the most borrowings"))
)]
pub async fn active_members(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::ActiveMembers).await
}
