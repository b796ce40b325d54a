//! Tenant-defined leave categories (annual, sick, unpaid, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{LeaveCategoryId, LeaveDays, TenantId};
use crate::validation::rules::validate_category_code;

/// A leave category and its yearly allocation.
///
/// Unlimited categories say so explicitly through `unlimited`; an allocation
/// of zero on a bounded category means no leave of that kind can be taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveCategory {
    pub id: LeaveCategoryId,
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    pub annual_allocation_days: i32,
    pub unlimited: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveCategory {
    pub fn new(
        tenant_id: TenantId,
        code: String,
        name: String,
        annual_allocation_days: i32,
        unlimited: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LeaveCategoryId::new(),
            tenant_id,
            code,
            name,
            annual_allocation_days,
            unlimited,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_bounded(&self) -> bool {
        !self.unlimited
    }

    pub fn annual_allocation(&self) -> LeaveDays {
        LeaveDays::from_days(self.annual_allocation_days.max(0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLeaveCategoryPayload {
    #[validate(custom(function = "validate_category_code"))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0, max = 366))]
    pub annual_allocation_days: i32,
    #[serde(default)]
    pub unlimited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLeaveCategoryPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 366))]
    pub annual_allocation_days: Option<i32>,
    pub unlimited: Option<bool>,
    pub active: Option<bool>,
}

impl UpdateLeaveCategoryPayload {
    pub fn apply_to(self, category: &mut LeaveCategory) {
        if let Some(name) = self.name {
            category.name = name.trim().to_string();
        }
        if let Some(days) = self.annual_allocation_days {
            category.annual_allocation_days = days;
        }
        if let Some(unlimited) = self.unlimited {
            category.unlimited = unlimited;
        }
        if let Some(active) = self.active {
            category.active = active;
        }
        category.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_allocation_on_bounded_category_is_zero_days() {
        let category = LeaveCategory::new(
            TenantId::new(),
            "unpaid".into(),
            "Unpaid leave".into(),
            0,
            false,
        );
        assert!(category.is_bounded());
        assert_eq!(category.annual_allocation(), LeaveDays::ZERO);
    }

    #[test]
    fn update_payload_only_touches_provided_fields() {
        let mut category =
            LeaveCategory::new(TenantId::new(), "annual".into(), "Annual".into(), 20, false);
        UpdateLeaveCategoryPayload {
            name: None,
            annual_allocation_days: Some(25),
            unlimited: None,
            active: Some(false),
        }
        .apply_to(&mut category);
        assert_eq!(category.name, "Annual");
        assert_eq!(category.annual_allocation_days, 25);
        assert!(!category.active);
    }

    #[test]
    fn create_payload_rejects_bad_code() {
        let payload = CreateLeaveCategoryPayload {
            code: "Annual Leave".into(),
            name: "Annual".into(),
            annual_allocation_days: 20,
            unlimited: false,
        };
        assert!(payload.validate().is_err());
    }
}
