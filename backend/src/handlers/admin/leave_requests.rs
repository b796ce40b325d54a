use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        leave_request::{ApprovePayload, LeaveRequest, RejectPayload},
        request_status::RequestStatus,
        PaginatedResponse, PaginationQuery,
    },
    repositories::{LeaveRequestFilters, LeaveRequestRepository},
    state::AppState,
    types::{EmployeeId, LeaveCategoryId, LeaveRequestId},
};

use super::common::parse_date_window;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LeaveRequestListQuery {
    pub status: Option<RequestStatus>,
    pub employee_id: Option<EmployeeId>,
    pub category_id: Option<LeaveCategoryId>,
    /// Requests ending on or after this date.
    pub from: Option<String>,
    /// Requests starting on or before this date.
    pub to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LeaveRequestListQuery {
    pub fn filters(&self) -> Result<LeaveRequestFilters, AppError> {
        let (from, to) = parse_date_window(self.from.as_deref(), self.to.as_deref())?;
        Ok(LeaveRequestFilters {
            status: self.status,
            employee_id: self.employee_id,
            category_id: self.category_id,
            from,
            to,
        })
    }
}

pub async fn list_leave_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<LeaveRequestListQuery>,
) -> Result<Json<PaginatedResponse<LeaveRequest>>, AppError> {
    let filters = q.filters()?;
    let page = PaginationQuery::from_optional(q.limit, q.offset);
    let (limit, offset) = (page.limit(), page.offset());
    let (rows, total) = LeaveRequestRepository::new()
        .list(&state.pool, user.employee.tenant_id, &filters, limit, offset)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, limit, offset)))
}

pub async fn approve_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveRequestId>,
    payload: Option<Json<ApprovePayload>>,
) -> Result<Json<LeaveRequest>, AppError> {
    let payload = payload.map(|Json(body)| body).unwrap_or_default();
    payload.validate()?;
    let approved = state
        .leave
        .approve(&user.employee, id, payload.comment)
        .await?;
    Ok(Json(approved))
}

pub async fn reject_leave_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveRequestId>,
    Json(payload): Json<RejectPayload>,
) -> Result<Json<LeaveRequest>, AppError> {
    payload.validate()?;
    let rejected = state
        .leave
        .reject(&user.employee, id, payload.comment)
        .await?;
    Ok(Json(rejected))
}
