use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::Datelike;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::holiday::HolidayResponse,
    repositories::HolidayRepository,
    state::AppState,
};

use super::leave::YearQuery;

/// The tenant's holiday calendar for one year, in date order.
pub async fn list_holidays_for_year(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<YearQuery>,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    let year = q
        .year
        .unwrap_or_else(|| user.today(state.config.time_zone).year());
    let holidays = HolidayRepository::new()
        .find_in_year(&state.pool, user.employee.tenant_id, year)
        .await?;

    Ok(Json(
        holidays
            .into_iter()
            .map(HolidayResponse::from)
            .collect::<Vec<_>>(),
    ))
}
