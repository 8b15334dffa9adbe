//! Single endpoint accepting any back-office command as tagged JSON,
//! e.g. `{"action": "delete_book", "book_id": 3}`.

use axum::{Json, extract::State};

use super::{ApiError, run};
use crate::domain::Principal;
use crate::infrastructure::AppState;
use crate::services::{Command, Outcome};

#[utoipa::path(
    post,
    path = "/api/actions",
    responses(
        (status = 200, description = "Command outcome"),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "No session"),
        (status = 403, description = "Role does not allow this action"),
        (status = 409, description = "State prevents the change")
    )
)]
pub async fn run_action(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Json(command): Json<Command>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, command).await
}
