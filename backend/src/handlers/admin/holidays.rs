use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::leave::YearQuery,
    middleware::CurrentUser,
    models::holiday::{CreateHolidayPayload, Holiday, HolidayResponse},
    repositories::{HolidayRepository, Repository},
    state::AppState,
    types::HolidayId,
};

pub async fn list_holidays(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<YearQuery>,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    let repo = HolidayRepository::new();
    let holidays = match q.year {
        Some(year) => {
            repo.find_in_year(&state.pool, user.employee.tenant_id, year)
                .await?
        }
        None => repo.find_all(&state.pool, user.employee.tenant_id).await?,
    };
    Ok(Json(
        holidays
            .into_iter()
            .map(HolidayResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn create_holiday(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateHolidayPayload>,
) -> Result<(StatusCode, Json<HolidayResponse>), AppError> {
    payload.validate()?;
    let CreateHolidayPayload {
        holiday_date,
        name,
        description,
    } = payload;

    let repo = HolidayRepository::new();
    if repo
        .find_by_date(&state.pool, user.employee.tenant_id, holiday_date)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "{} is already a holiday",
            holiday_date
        )));
    }

    let description = description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let holiday = Holiday::new(
        user.employee.tenant_id,
        holiday_date,
        name.trim().to_string(),
        description,
    );
    let created = repo.create(&state.pool, &holiday).await?;
    Ok((StatusCode::CREATED, Json(HolidayResponse::from(created))))
}

pub async fn delete_holiday(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<HolidayId>,
) -> Result<Json<Value>, AppError> {
    HolidayRepository::new()
        .delete(&state.pool, user.employee.tenant_id, id)
        .await?;
    Ok(Json(json!({ "message": "Holiday deleted", "id": id })))
}
