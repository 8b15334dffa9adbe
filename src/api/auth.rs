use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::ApiError;
use crate::auth::create_jwt;
use crate::domain::Principal;
use crate::infrastructure::AppState;
use crate::services::identity_service::{self, LoginRequest};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session token and resolved principal"),
        (status = 400, description = "Malformed user id, name or role"),
        (status = 403, description = "Staff member claimed manager"),
        (status = 404, description = "No matching member or staff record")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    tracing::info!("Login attempt for user {} as {}", payload.user_id, payload.role);

    let principal = identity_service::login(state.db(), payload).await?;

    match create_jwt(&principal, state.config.session_ttl_hours) {
        Ok(token) => Ok((
            StatusCode::OK,
            Json(json!({ "token": token, "principal": principal })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Could not start a session" })),
            )
                .into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Principal bound to the session token"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_me(principal: Principal) -> Json<Principal> {
    Json(principal)
}
