use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        leave_balance::LeaveBalance, leave_category::LeaveCategory,
        leave_request::{LeaveRequest, SubmitLeavePayload},
    },
    repositories::{
        LeaveBalanceRepository, LeaveCategoryRepository, LeaveRequestRepository,
        LeaveRequestRepositoryTrait,
    },
    services::leave_workflow::LeavePreview,
    state::AppState,
    types::LeaveRequestId,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct YearQuery {
    /// Leave year; defaults to the current year in the tenant's zone.
    pub year: Option<i32>,
}

pub async fn submit_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SubmitLeavePayload>,
) -> Result<(StatusCode, Json<LeaveRequest>), AppError> {
    payload.validate()?;
    let today = user.today(state.config.time_zone);
    let created = state.leave.submit(&user.employee, payload, today).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Runs the same evaluation as submission and reports the verdict without
/// saving anything.
pub async fn preview_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SubmitLeavePayload>,
) -> Result<Json<LeavePreview>, AppError> {
    payload.validate()?;
    let today = user.today(state.config.time_zone);
    let preview = state.leave.preview(&user.employee, &payload, today).await?;
    Ok(Json(preview))
}

pub async fn my_leave_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let requests = LeaveRequestRepository::new()
        .find_by_employee(&state.pool, user.employee.tenant_id, user.employee.id)
        .await?;
    Ok(Json(requests))
}

pub async fn get_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveRequestId>,
) -> Result<Json<LeaveRequest>, AppError> {
    let request = LeaveRequestRepository::new()
        .find_by_id(&state.pool, user.employee.tenant_id, id)
        .await?;
    if request.employee_id != user.employee.id && !user.employee.is_approver() {
        return Err(AppError::NotFound("Leave request not found".into()));
    }
    Ok(Json(request))
}

pub async fn cancel_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveRequestId>,
) -> Result<Json<LeaveRequest>, AppError> {
    let cancelled = state.leave.cancel(&user.employee, id).await?;
    Ok(Json(cancelled))
}

pub async fn my_balances(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<YearQuery>,
) -> Result<Json<Vec<LeaveBalance>>, AppError> {
    let year = q
        .year
        .unwrap_or_else(|| user.today(state.config.time_zone).year());
    let balances = LeaveBalanceRepository::new()
        .list_for_employee(&state.pool, user.employee.tenant_id, user.employee.id, year)
        .await?;
    Ok(Json(balances))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<LeaveCategory>>, AppError> {
    let categories = LeaveCategoryRepository::new()
        .find_active(&state.pool, user.employee.tenant_id)
        .await?;
    Ok(Json(categories))
}
