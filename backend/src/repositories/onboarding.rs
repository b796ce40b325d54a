//! Onboarding record store. Status writes are compare-and-swap on the current status.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::onboarding::{OnboardingRecord, OnboardingStatus};
use crate::repositories::common::{push_and, push_pagination, tenant_scoped};
use crate::types::{EmployeeId, OnboardingId, TenantId};

const TABLE_NAME: &str = "onboarding_records";
const SELECT_COLUMNS: &str =
    "id, tenant_id, employee_id, start_date, status, notes, updated_by, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct OnboardingRepository;

impl OnboardingRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(
        &self,
        db: &PgPool,
        item: &OnboardingRecord,
    ) -> Result<OnboardingRecord, AppError> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, OnboardingRecord>(&query)
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(item.employee_id)
            .bind(item.start_date)
            .bind(item.status)
            .bind(&item.notes)
            .bind(item.updated_by)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: OnboardingId,
    ) -> Result<OnboardingRecord, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, OnboardingRecord>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Onboarding record not found".into()))
    }

    pub async fn list(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        status: Option<OnboardingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OnboardingRecord>, i64), AppError> {
        let mut builder = tenant_scoped(&format!("SELECT {}", SELECT_COLUMNS), TABLE_NAME, tenant_id);
        let mut count = tenant_scoped("SELECT COUNT(*)", TABLE_NAME, tenant_id);
        if let Some(status) = status {
            for b in [&mut builder, &mut count] {
                push_and(b);
                b.push("status = ");
                b.push_bind(status);
            }
        }
        builder.push(" ORDER BY start_date DESC");
        push_pagination(&mut builder, limit, offset);

        let rows = builder.build_query_as::<OnboardingRecord>().fetch_all(db).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
        Ok((rows, total))
    }

    /// Moves `id` from `current` to `next`, replacing notes when given.
    /// `None` means the stored status is no longer `current`.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_status(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: OnboardingId,
        current: OnboardingStatus,
        next: OnboardingStatus,
        notes: Option<String>,
        updated_by: EmployeeId,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<OnboardingRecord>, AppError> {
        let query = format!(
            "UPDATE {} SET status = $4, notes = COALESCE($5, notes), updated_by = $6, \
             updated_at = $7 WHERE tenant_id = $1 AND id = $2 AND status = $3 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, OnboardingRecord>(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(current)
            .bind(next)
            .bind(notes)
            .bind(updated_by)
            .bind(timestamp)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}
