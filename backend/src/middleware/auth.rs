use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::{
    models::{employee::Employee, tenant::Tenant},
    repositories::{EmployeeRepository, TenantRepository},
    state::AppState,
    utils::{jwt::verify_access_token, time::today_local},
};

/// The authenticated employee and the tenant they belong to.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub employee: Employee,
    pub tenant: Tenant,
}

impl CurrentUser {
    pub fn zone(&self, fallback: Tz) -> Tz {
        self.tenant.zone(fallback)
    }

    /// Today's date in the tenant's time zone.
    pub fn today(&self, fallback: Tz) -> NaiveDate {
        today_local(&self.zone(fallback))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Authenticated,
    Approver,
    TenantAdmin,
}

impl Requirement {
    fn allows(self, employee: &Employee) -> bool {
        match self {
            Requirement::Authenticated => true,
            Requirement::Approver => employee.is_approver(),
            Requirement::TenantAdmin => employee.is_tenant_admin(),
        }
    }
}

pub async fn auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    guarded(&state, Requirement::Authenticated, request, next).await
}

// Auth + manager/hr/admin role for approval routes
pub async fn auth_approver(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    guarded(&state, Requirement::Approver, request, next).await
}

// Auth + hr/admin role for tenant administration
pub async fn auth_tenant_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    guarded(&state, Requirement::TenantAdmin, request, next).await
}

async fn guarded(
    state: &AppState,
    requirement: Requirement,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned());
    let user = authenticate_request(auth_header.as_deref(), state).await?;

    if !requirement.allows(&user.employee) {
        tracing::warn!(
            tenant_id = %user.tenant.id,
            employee_id = %user.employee.id,
            role = %user.employee.role,
            "role not permitted for route"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(rest) = header.strip_prefix("bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

async fn authenticate_request(
    auth_header: Option<&str>,
    state: &AppState,
) -> Result<CurrentUser, StatusCode> {
    let token = auth_header
        .and_then(parse_bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = verify_access_token(token, &state.config.jwt_secret)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let employee = EmployeeRepository::new()
        .find_optional(&state.pool, claims.tenant_id, claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let tenant = TenantRepository::new()
        .find_by_id(&state.pool, employee.tenant_id)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    Ok(CurrentUser { employee, tenant })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::EmployeeRole;
    use crate::types::TenantId;

    #[test]
    fn parse_bearer_token_accepts_any_scheme_case() {
        assert_eq!(parse_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("BEARER   abc"), Some("abc"));
        assert_eq!(parse_bearer_token("Basic abc"), None);
        assert_eq!(parse_bearer_token("abc"), None);
    }

    #[test]
    fn requirements_follow_roles() {
        let employee = |role| Employee::new(TenantId::new(), "A".into(), "a@x.test".into(), role, None, None);

        assert!(Requirement::Authenticated.allows(&employee(EmployeeRole::Employee)));
        assert!(!Requirement::Approver.allows(&employee(EmployeeRole::Employee)));
        assert!(Requirement::Approver.allows(&employee(EmployeeRole::Manager)));
        assert!(!Requirement::TenantAdmin.allows(&employee(EmployeeRole::Manager)));
        assert!(Requirement::TenantAdmin.allows(&employee(EmployeeRole::Hr)));
        assert!(Requirement::TenantAdmin.allows(&employee(EmployeeRole::Admin)));
    }
}
