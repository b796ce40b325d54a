use axum::{
    extract::{Extension, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::leave_policy::{LeavePolicy, UpdateLeavePolicyPayload},
    repositories::LeavePolicyRepository,
    state::AppState,
};

pub async fn get_leave_policy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<LeavePolicy>, AppError> {
    let policy = LeavePolicyRepository::new()
        .get_or_default(&state.pool, user.employee.tenant_id)
        .await?;
    Ok(Json(policy))
}

/// Replaces the tenant's policy. Takes effect for evaluations that start
/// after the write commits.
pub async fn update_leave_policy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateLeavePolicyPayload>,
) -> Result<Json<LeavePolicy>, AppError> {
    payload.validate()?;
    let policy = payload.into_policy(user.employee.tenant_id);
    let saved = LeavePolicyRepository::new()
        .upsert(&state.pool, &policy)
        .await?;
    tracing::info!(
        tenant_id = %saved.tenant_id,
        updated_by = %user.employee.id,
        "leave policy updated"
    );
    Ok(Json(saved))
}
