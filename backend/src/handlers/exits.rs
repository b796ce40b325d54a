use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::exit_request::{CreateExitPayload, ExitRequest, ExitStatus},
    repositories::ExitRequestRepository,
    state::AppState,
    types::ExitRequestId,
};

pub async fn create_exit_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateExitPayload>,
) -> Result<(StatusCode, Json<ExitRequest>), AppError> {
    payload.validate()?;
    let today = user.today(state.config.time_zone);
    let created = state
        .lifecycle
        .open_exit(&user.employee, payload, today)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn my_exit_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ExitRequest>>, AppError> {
    let requests = ExitRequestRepository::new()
        .find_by_employee(&state.pool, user.employee.tenant_id, user.employee.id)
        .await?;
    Ok(Json(requests))
}

pub async fn withdraw_exit_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<ExitRequestId>,
) -> Result<Json<ExitRequest>, AppError> {
    let updated = state
        .lifecycle
        .advance_exit(&user.employee, id, ExitStatus::Withdrawn)
        .await?;
    Ok(Json(updated))
}
