use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{ApiError, run};
use crate::domain::Principal;
use crate::infrastructure::AppState;
use crate::services::registrar_service::{NewMember, NewStaff};
use crate::services::{Command, Outcome};

#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Members with total borrow counts, newest first"),
        (status = 403, description = "Staff and managers only")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::MembersWithBorrows).await
}

#[utoipa::path(
    post,
    path = "/api/members",
    responses(
        (status = 201, description = "User and member rows created together"),
        (status = 400, description = "A field is missing"),
        (status = 500, description = "Registration rolled back")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Json(member): Json<NewMember>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let outcome = run(&state, principal, Command::AddMember(member)).await?;
    Ok((StatusCode::CREATED, outcome))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}/unpaid-fines",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Yes when an unpaid fine above zero exists"),
        (status = 403, description = "Members may only ask about themselves")
    )
)]
pub async fn has_unpaid_fines(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Path(id): Path<i32>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::CheckMemberFines { member_id: id }).await
}

#[utoipa::path(
    post,
    path = "/api/staff",
    responses(
        (status = 201, description = "User and staff rows created together"),
        (status = 403, description = "Managers only")
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Json(staff): Json<NewStaff>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let outcome = run(&state, principal, Command::AddStaff(staff)).await?;
    Ok((StatusCode::CREATED, outcome))
}
