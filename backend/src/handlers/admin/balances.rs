use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        leave_balance::{AdjustBalancePayload, LeaveBalance, OpenYearPayload, OpenYearResponse},
        PaginatedResponse, PaginationQuery,
    },
    repositories::LeaveBalanceRepository,
    state::AppState,
    types::{EmployeeId, LeaveBalanceId},
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BalanceListQuery {
    pub year: Option<i32>,
    pub employee_id: Option<EmployeeId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_balances(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<BalanceListQuery>,
) -> Result<Json<PaginatedResponse<LeaveBalance>>, AppError> {
    let year = q
        .year
        .unwrap_or_else(|| user.today(state.config.time_zone).year());
    let page = PaginationQuery::from_optional(q.limit, q.offset);
    let (limit, offset) = (page.limit(), page.offset());
    let (rows, total) = LeaveBalanceRepository::new()
        .list(
            &state.pool,
            user.employee.tenant_id,
            year,
            q.employee_id,
            limit,
            offset,
        )
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, limit, offset)))
}

pub async fn open_leave_year(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OpenYearPayload>,
) -> Result<Json<OpenYearResponse>, AppError> {
    payload.validate()?;
    let created = state
        .balances
        .open_year(user.employee.tenant_id, payload.year)
        .await?;
    Ok(Json(OpenYearResponse {
        year: payload.year,
        created,
    }))
}

pub async fn adjust_balance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveBalanceId>,
    Json(payload): Json<AdjustBalancePayload>,
) -> Result<Json<LeaveBalance>, AppError> {
    payload.validate()?;
    let updated = state
        .balances
        .adjust(&user.employee, id, payload.delta, &payload.reason)
        .await?;
    Ok(Json(updated))
}
