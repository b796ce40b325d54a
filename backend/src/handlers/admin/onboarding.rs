use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        onboarding::{
            CreateOnboardingPayload, OnboardingRecord, OnboardingStatus,
            UpdateOnboardingStatusPayload,
        },
        PaginatedResponse, PaginationQuery,
    },
    repositories::OnboardingRepository,
    state::AppState,
    types::OnboardingId,
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OnboardingListQuery {
    pub status: Option<OnboardingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_onboarding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<OnboardingListQuery>,
) -> Result<Json<PaginatedResponse<OnboardingRecord>>, AppError> {
    let page = PaginationQuery::from_optional(q.limit, q.offset);
    let (limit, offset) = (page.limit(), page.offset());
    let (rows, total) = OnboardingRepository::new()
        .list(&state.pool, user.employee.tenant_id, q.status, limit, offset)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, limit, offset)))
}

pub async fn create_onboarding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateOnboardingPayload>,
) -> Result<(StatusCode, Json<OnboardingRecord>), AppError> {
    payload.validate()?;
    let created = state
        .lifecycle
        .start_onboarding(&user.employee, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_onboarding_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<OnboardingId>,
    Json(payload): Json<UpdateOnboardingStatusPayload>,
) -> Result<Json<OnboardingRecord>, AppError> {
    payload.validate()?;
    let updated = state
        .lifecycle
        .advance_onboarding(&user.employee, id, payload.status, payload.notes)
        .await?;
    Ok(Json(updated))
}
