use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::employee::{CreateEmployeePayload, Employee},
    repositories::{EmployeeRepository, Repository},
    state::AppState,
};

pub async fn list_employees(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = EmployeeRepository::new()
        .find_all(&state.pool, user.employee.tenant_id)
        .await?;
    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    payload.validate()?;
    let tenant_id = user.employee.tenant_id;
    let repo = EmployeeRepository::new();

    if let Some(manager_id) = payload.manager_id {
        if !repo.exists(&state.pool, tenant_id, manager_id).await? {
            return Err(AppError::BadRequest("manager_id does not exist".into()));
        }
    }

    let employee = Employee::new(
        tenant_id,
        payload.full_name.trim().to_string(),
        payload.email.trim().to_ascii_lowercase(),
        payload.role,
        payload.manager_id,
        payload.joined_on,
    );
    let created = repo.create(&state.pool, &employee).await?;
    tracing::info!(
        tenant_id = %tenant_id,
        employee_id = %created.id,
        role = %created.role,
        "employee created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
