//! Per-tenant leave policy storage.

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::leave_policy::{LeavePolicy, LeavePolicyRow};
use crate::types::TenantId;

const TABLE_NAME: &str = "leave_policies";
const SELECT_COLUMNS: &str = "tenant_id, weekend_days, min_notice_days, enforce_notice, \
                              allow_future_dates, allow_past_dates, max_consecutive_days, \
                              half_day_allowed, max_carry_forward_days, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct LeavePolicyRepository;

impl LeavePolicyRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
    ) -> Result<Option<LeavePolicy>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, LeavePolicyRow>(&query)
            .bind(tenant_id)
            .fetch_optional(db)
            .await?;
        row.map(LeavePolicy::try_from)
            .transpose()
            .map_err(AppError::InternalServerError)
    }

    /// The stored policy, or the default one for tenants that never saved one.
    pub async fn get_or_default(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
    ) -> Result<LeavePolicy, AppError> {
        Ok(self
            .find(db, tenant_id)
            .await?
            .unwrap_or_else(|| LeavePolicy::default_for(tenant_id)))
    }

    pub async fn upsert(&self, db: &PgPool, policy: &LeavePolicy) -> Result<LeavePolicy, AppError> {
        let query = format!(
            "INSERT INTO {table} ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW()) \
             ON CONFLICT (tenant_id) DO UPDATE SET \
               weekend_days = EXCLUDED.weekend_days, \
               min_notice_days = EXCLUDED.min_notice_days, \
               enforce_notice = EXCLUDED.enforce_notice, \
               allow_future_dates = EXCLUDED.allow_future_dates, \
               allow_past_dates = EXCLUDED.allow_past_dates, \
               max_consecutive_days = EXCLUDED.max_consecutive_days, \
               half_day_allowed = EXCLUDED.half_day_allowed, \
               max_carry_forward_days = EXCLUDED.max_carry_forward_days, \
               updated_at = NOW() \
             RETURNING {columns}",
            table = TABLE_NAME,
            columns = SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, LeavePolicyRow>(&query)
            .bind(policy.tenant_id)
            .bind(policy.weekend.indices())
            .bind(policy.min_notice_days)
            .bind(policy.enforce_notice)
            .bind(policy.allow_future_dates)
            .bind(policy.allow_past_dates)
            .bind(policy.max_consecutive_days)
            .bind(policy.half_day_allowed)
            .bind(policy.max_carry_forward_days)
            .fetch_one(db)
            .await?;
        LeavePolicy::try_from(row).map_err(AppError::InternalServerError)
    }
}
