use axum::{
    Json,
    extract::{Query, State},
};

use super::{ApiError, run};
use crate::domain::Principal;
use crate::infrastructure::AppState;
use crate::services::fines_service::FinePeriod;
use crate::services::{Command, Outcome};

#[utoipa::path(
    get,
    path = "/api/fines",
    responses(
        (status = 200, description = "All fines, unpaid first then by amount"),
        (status = 403, description = "Staff and managers only")
    )
)]
pub async fn list_fines(
    State(state): State<AppState>,
    principal: Option<Principal>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::ListFines).await
}

#[utoipa::path(
    get,
    path = "/api/fines/period",
    params(
        ("start_date" = String, Query, description = "First borrow date, YYYY-MM-DD"),
        ("end_date" = String, Query, description = "Last borrow date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Fines whose borrowing started in the window"),
        (status = 400, description = "Missing or malformed dates")
    )
)]
pub async fn fines_in_period(
    State(state): State<AppState>,
    principal: Option<Principal>,
    Query(period): Query<FinePeriod>,
) -> Result<Json<Outcome>, ApiError> {
    run(&state, principal, Command::FinesPeriod(period)).await
}
