use std::collections::HashMap;

use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{
        employee::Employee, leave_category::LeaveCategory, leave_request::LeaveRequest,
        request_status::RequestStatus,
    },
    repositories::{
        EmployeeRepository, LeaveCategoryRepository, LeaveRequestFilters, LeaveRequestRepository,
        Repository,
    },
    state::AppState,
    types::{EmployeeId, LeaveCategoryId},
    utils::csv::render_csv,
};

use super::common::parse_date_window;

const EXPORT_HEADERS: [&str; 13] = [
    "request_id",
    "employee_id",
    "employee_name",
    "email",
    "category",
    "start_date",
    "end_date",
    "half_day",
    "chargeable_days",
    "status",
    "decided_by",
    "decided_at",
    "reason",
];

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LeaveExportQuery {
    pub status: Option<RequestStatus>,
    pub employee_id: Option<EmployeeId>,
    pub category_id: Option<LeaveCategoryId>,
    pub from: Option<String>, // YYYY-MM-DD
    pub to: Option<String>,   // YYYY-MM-DD
}

pub async fn export_leave_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<LeaveExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = user.employee.tenant_id;
    let (from, to) = parse_date_window(q.from.as_deref(), q.to.as_deref())?;
    let filters = LeaveRequestFilters {
        status: q.status,
        employee_id: q.employee_id,
        category_id: q.category_id,
        from,
        to,
    };

    let requests = LeaveRequestRepository::new()
        .export(&state.pool, tenant_id, &filters)
        .await?;
    let employees: HashMap<EmployeeId, Employee> = EmployeeRepository::new()
        .find_all(&state.pool, tenant_id)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();
    let categories: HashMap<LeaveCategoryId, LeaveCategory> = LeaveCategoryRepository::new()
        .find_all(&state.pool, tenant_id)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let count = requests.len();
    let body = render_csv(
        &EXPORT_HEADERS,
        requests
            .iter()
            .map(|request| export_row(request, &employees, &categories)),
    )?;
    tracing::info!(tenant_id = %tenant_id, rows = count, "leave requests exported");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"leave_requests.csv\""),
    );
    Ok((headers, body))
}

fn export_row(
    request: &LeaveRequest,
    employees: &HashMap<EmployeeId, Employee>,
    categories: &HashMap<LeaveCategoryId, LeaveCategory>,
) -> Vec<String> {
    let employee = employees.get(&request.employee_id);
    vec![
        request.id.to_string(),
        request.employee_id.to_string(),
        employee.map(|e| e.full_name.clone()).unwrap_or_default(),
        employee.map(|e| e.email.clone()).unwrap_or_default(),
        categories
            .get(&request.category_id)
            .map(|c| c.code.clone())
            .unwrap_or_default(),
        request.start_date.format("%Y-%m-%d").to_string(),
        request.end_date.format("%Y-%m-%d").to_string(),
        request.half_day.to_string(),
        request.chargeable.to_string(),
        request.status.to_string(),
        request
            .decided_by
            .map(|id| id.to_string())
            .unwrap_or_default(),
        request
            .decided_at
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default(),
        request.reason.clone().unwrap_or_default(),
    ]
}
