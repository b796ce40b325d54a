//! Exit request store. Status writes are compare-and-swap on the current status.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::exit_request::{ExitRequest, ExitStatus};
use crate::repositories::common::{push_and, push_pagination, tenant_scoped};
use crate::types::{EmployeeId, ExitRequestId, TenantId};

const TABLE_NAME: &str = "exit_requests";
const SELECT_COLUMNS: &str = "id, tenant_id, employee_id, last_working_day, reason, status, \
                              updated_by, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct ExitRequestRepository;

impl ExitRequestRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, db: &PgPool, item: &ExitRequest) -> Result<ExitRequest, AppError> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, ExitRequest>(&query)
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(item.employee_id)
            .bind(item.last_working_day)
            .bind(&item.reason)
            .bind(item.status)
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
        id: ExitRequestId,
    ) -> Result<ExitRequest, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, ExitRequest>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Exit request not found".into()))
    }

    /// Open (non-terminal) request for the employee, if any.
    pub async fn find_open_for_employee(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
    ) -> Result<Option<ExitRequest>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 \
             AND status NOT IN ('completed', 'rejected', 'withdrawn') \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, ExitRequest>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn find_by_employee(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
    ) -> Result<Vec<ExitRequest>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 ORDER BY created_at DESC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, ExitRequest>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn list(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        status: Option<ExitStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ExitRequest>, i64), AppError> {
        let mut builder = tenant_scoped(&format!("SELECT {}", SELECT_COLUMNS), TABLE_NAME, tenant_id);
        let mut count = tenant_scoped("SELECT COUNT(*)", TABLE_NAME, tenant_id);
        if let Some(status) = status {
            for b in [&mut builder, &mut count] {
                push_and(b);
                b.push("status = ");
                b.push_bind(status);
            }
        }
        builder.push(" ORDER BY created_at DESC");
        push_pagination(&mut builder, limit, offset);

        let rows = builder.build_query_as::<ExitRequest>().fetch_all(db).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
        Ok((rows, total))
    }

    /// Moves `id` from `current` to `next`; returns the updated row, or `None`
    /// when the stored status is no longer `current`.
    pub async fn update_status(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: ExitRequestId,
        current: ExitStatus,
        next: ExitStatus,
        updated_by: EmployeeId,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<ExitRequest>, AppError> {
        let query = format!(
            "UPDATE {} SET status = $4, updated_by = $5, updated_at = $6 \
             WHERE tenant_id = $1 AND id = $2 AND status = $3 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, ExitRequest>(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(current)
            .bind(next)
            .bind(updated_by)
            .bind(timestamp)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}
