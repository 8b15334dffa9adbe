pub mod actions;
pub mod auth;
pub mod books;
pub mod fines;
pub mod health;
pub mod members;
pub mod reports;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::domain::{DomainError, Principal};
use crate::infrastructure::AppState;
use crate::services::{self, Command, Outcome};

/// Domain error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) | DomainError::InsufficientPrivilege(_) => {
                StatusCode::FORBIDDEN
            }
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Dispatch a command on behalf of whoever presented a session token.
pub(crate) async fn run(
    state: &AppState,
    principal: Option<Principal>,
    command: Command,
) -> Result<Json<Outcome>, ApiError> {
    let outcome = services::execute(state, principal.as_ref(), command).await?;
    Ok(Json(outcome))
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Session
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Typed command endpoint
        .route("/actions", post(actions::run_action))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            put(books::update_book).delete(books::delete_book),
        )
        .route("/books/:id/borrowed", get(books::is_borrowed))
        .route("/books/:id/available", get(books::is_available))
        // Members & staff
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/:id/unpaid-fines", get(members::has_unpaid_fines))
        .route("/staff", post(members::create_staff))
        // Fines
        .route("/fines", get(fines::list_fines))
        .route("/fines/period", get(fines::fines_in_period))
        // Reports
        .route("/reports/monthly", get(reports::monthly_summary))
        .route("/reports/popular-books", get(reports::popular_books))
        .route("/reports/top-authors", get(reports::top_authors))
        .route("/reports/active-members", get(reports::active_members))
        .with_state(state)
}
