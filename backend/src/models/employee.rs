//! Employees and the roles that gate approval and tenant administration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{text_enum_sql, EmployeeId, TenantId};
use crate::validation::rules::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: EmployeeId,
    pub tenant_id: TenantId,
    pub full_name: String,
    pub email: String,
    pub role: EmployeeRole,
    pub manager_id: Option<EmployeeId>,
    pub joined_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        tenant_id: TenantId,
        full_name: String,
        email: String,
        role: EmployeeRole,
        manager_id: Option<EmployeeId>,
        joined_on: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EmployeeId::new(),
            tenant_id,
            full_name,
            email,
            role,
            manager_id,
            joined_on,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_approver(&self) -> bool {
        self.role.is_approver()
    }

    pub fn is_tenant_admin(&self) -> bool {
        self.role.is_tenant_admin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    #[default]
    Employee,
    Manager,
    Hr,
    Admin,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 4] = [
        EmployeeRole::Employee,
        EmployeeRole::Manager,
        EmployeeRole::Hr,
        EmployeeRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Employee => "employee",
            EmployeeRole::Manager => "manager",
            EmployeeRole::Hr => "hr",
            EmployeeRole::Admin => "admin",
        }
    }

    /// Roles allowed to decide leave and exit requests.
    pub fn is_approver(&self) -> bool {
        !matches!(self, EmployeeRole::Employee)
    }

    /// Roles allowed to change tenant configuration.
    pub fn is_tenant_admin(&self) -> bool {
        matches!(self, EmployeeRole::Hr | EmployeeRole::Admin)
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid employee role: {}", s))
    }
}

text_enum_sql!(EmployeeRole);

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: EmployeeRole,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    #[serde(default)]
    pub joined_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approver_and_admin_roles() {
        assert!(!EmployeeRole::Employee.is_approver());
        assert!(EmployeeRole::Manager.is_approver());
        assert!(!EmployeeRole::Manager.is_tenant_admin());
        assert!(EmployeeRole::Hr.is_tenant_admin());
        assert!(EmployeeRole::Admin.is_tenant_admin());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("HR".parse::<EmployeeRole>(), Ok(EmployeeRole::Hr));
        assert!("owner".parse::<EmployeeRole>().is_err());
        assert_eq!(
            serde_json::to_value(EmployeeRole::Manager).unwrap(),
            serde_json::json!("manager")
        );
    }

    #[test]
    fn create_payload_requires_valid_email() {
        let payload = CreateEmployeePayload {
            full_name: "Ada Lovelace".into(),
            email: "not-an-email".into(),
            role: EmployeeRole::Employee,
            manager_id: None,
            joined_on: None,
        };
        let errors = payload.validate().expect_err("invalid email");
        assert!(errors.field_errors().contains_key("email"));
    }
}
