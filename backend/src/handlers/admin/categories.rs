use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::leave_category::{
        CreateLeaveCategoryPayload, LeaveCategory, UpdateLeaveCategoryPayload,
    },
    repositories::{LeaveCategoryRepository, Repository},
    state::AppState,
    types::LeaveCategoryId,
};

/// All categories, inactive ones included.
pub async fn list_leave_categories(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<LeaveCategory>>, AppError> {
    let categories = LeaveCategoryRepository::new()
        .find_all(&state.pool, user.employee.tenant_id)
        .await?;
    Ok(Json(categories))
}

pub async fn create_leave_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateLeaveCategoryPayload>,
) -> Result<(StatusCode, Json<LeaveCategory>), AppError> {
    payload.validate()?;
    let category = LeaveCategory::new(
        user.employee.tenant_id,
        payload.code.trim().to_ascii_lowercase(),
        payload.name.trim().to_string(),
        payload.annual_allocation_days,
        payload.unlimited,
    );
    let created = LeaveCategoryRepository::new()
        .create(&state.pool, &category)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_leave_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<LeaveCategoryId>,
    Json(payload): Json<UpdateLeaveCategoryPayload>,
) -> Result<Json<LeaveCategory>, AppError> {
    payload.validate()?;
    let repo = LeaveCategoryRepository::new();
    let mut category = repo
        .find_by_id(&state.pool, user.employee.tenant_id, id)
        .await?;
    payload.apply_to(&mut category);
    let updated = repo.update(&state.pool, &category).await?;
    Ok(Json(updated))
}
