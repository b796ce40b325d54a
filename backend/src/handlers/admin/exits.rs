use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        exit_request::{ExitRequest, ExitStatus, UpdateExitStatusPayload},
        PaginatedResponse, PaginationQuery,
    },
    repositories::ExitRequestRepository,
    state::AppState,
    types::ExitRequestId,
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ExitListQuery {
    pub status: Option<ExitStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_exit_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<ExitListQuery>,
) -> Result<Json<PaginatedResponse<ExitRequest>>, AppError> {
    let page = PaginationQuery::from_optional(q.limit, q.offset);
    let (limit, offset) = (page.limit(), page.offset());
    let (rows, total) = ExitRequestRepository::new()
        .list(&state.pool, user.employee.tenant_id, q.status, limit, offset)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, limit, offset)))
}

pub async fn update_exit_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<ExitRequestId>,
    Json(payload): Json<UpdateExitStatusPayload>,
) -> Result<Json<ExitRequest>, AppError> {
    let updated = state
        .lifecycle
        .advance_exit(&user.employee, id, payload.status)
        .await?;
    Ok(Json(updated))
}
