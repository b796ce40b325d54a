//! Leave request store.
//!
//! Status changes are guarded on the current status (`WHERE status = 'pending'`)
//! and report the number of rows they touched; zero means the request moved
//! on underneath the caller.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::AppError;
use crate::models::{leave_request::LeaveRequest, request_status::RequestStatus};
use crate::repositories::common::{push_and, push_pagination, tenant_scoped};
use crate::types::{EmployeeId, LeaveCategoryId, LeaveRequestId, TenantId};

const TABLE_NAME: &str = "leave_requests";
const SELECT_COLUMNS: &str = "id, tenant_id, employee_id, category_id, start_date, end_date, \
                              half_day, chargeable_half_days, reason, status, decided_by, \
                              decided_at, decision_comment, cancelled_at, created_at, updated_at";

/// Filters for the administrative listing and the CSV export.
#[derive(Debug, Clone, Default)]
pub struct LeaveRequestFilters {
    pub status: Option<RequestStatus>,
    pub employee_id: Option<EmployeeId>,
    pub category_id: Option<LeaveCategoryId>,
    /// Requests ending on or after this date.
    pub from: Option<NaiveDate>,
    /// Requests starting on or before this date.
    pub to: Option<NaiveDate>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRequestRepositoryTrait: Send + Sync {
    async fn create(&self, db: &PgPool, item: &LeaveRequest) -> Result<LeaveRequest, AppError>;

    async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveRequestId,
    ) -> Result<LeaveRequest, AppError>;

    async fn find_by_employee(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, AppError>;

    /// `SELECT ... FOR UPDATE` inside the caller's transaction.
    async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveRequestId,
    ) -> Result<Option<LeaveRequest>, AppError>;

    /// Records an approval or rejection on a still-pending request.
    async fn mark_decided(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveRequestId,
        status: RequestStatus,
        decided_by: EmployeeId,
        comment: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Cancels a still-pending request owned by `employee_id`.
    async fn cancel(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveRequestId,
        employee_id: EmployeeId,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LeaveRequestRepository;

impl LeaveRequestRepository {
    pub fn new() -> Self {
        Self
    }

    /// Filtered page of requests, newest start date first, plus the total count.
    pub async fn list(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        filters: &LeaveRequestFilters,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LeaveRequest>, i64), AppError> {
        let mut builder = tenant_scoped(&format!("SELECT {}", SELECT_COLUMNS), TABLE_NAME, tenant_id);
        let mut count = tenant_scoped("SELECT COUNT(*)", TABLE_NAME, tenant_id);
        for b in [&mut builder, &mut count] {
            apply_filters(b, filters);
        }
        builder.push(" ORDER BY start_date DESC, created_at DESC");
        push_pagination(&mut builder, limit, offset);

        let rows = builder.build_query_as::<LeaveRequest>().fetch_all(db).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
        Ok((rows, total))
    }

    /// Every matching request, for export.
    pub async fn export(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        filters: &LeaveRequestFilters,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let mut builder = tenant_scoped(&format!("SELECT {}", SELECT_COLUMNS), TABLE_NAME, tenant_id);
        apply_filters(&mut builder, filters);
        builder.push(" ORDER BY start_date ASC, created_at ASC");
        let rows = builder.build_query_as::<LeaveRequest>().fetch_all(db).await?;
        Ok(rows)
    }
}

fn apply_filters(builder: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>, filters: &LeaveRequestFilters) {
    if let Some(status) = filters.status {
        push_and(builder);
        builder.push("status = ");
        builder.push_bind(status);
    }
    if let Some(employee_id) = filters.employee_id {
        push_and(builder);
        builder.push("employee_id = ");
        builder.push_bind(employee_id);
    }
    if let Some(category_id) = filters.category_id {
        push_and(builder);
        builder.push("category_id = ");
        builder.push_bind(category_id);
    }
    if let Some(from) = filters.from {
        push_and(builder);
        builder.push("end_date >= ");
        builder.push_bind(from);
    }
    if let Some(to) = filters.to {
        push_and(builder);
        builder.push("start_date <= ");
        builder.push_bind(to);
    }
}

#[async_trait]
impl LeaveRequestRepositoryTrait for LeaveRequestRepository {
    async fn create(&self, db: &PgPool, item: &LeaveRequest) -> Result<LeaveRequest, AppError> {
        let query = format!(
            "INSERT INTO {} ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(item.employee_id)
            .bind(item.category_id)
            .bind(item.start_date)
            .bind(item.end_date)
            .bind(item.half_day)
            .bind(item.chargeable)
            .bind(&item.reason)
            .bind(item.status)
            .bind(item.decided_by)
            .bind(item.decided_at)
            .bind(&item.decision_comment)
            .bind(item.cancelled_at)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveRequestId,
    ) -> Result<LeaveRequest, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave request not found".into()))
    }

    async fn find_by_employee(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 \
             ORDER BY start_date DESC, created_at DESC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveRequestId,
    ) -> Result<Option<LeaveRequest>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2 FOR UPDATE",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn mark_decided(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveRequestId,
        status: RequestStatus,
        decided_by: EmployeeId,
        comment: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let query = format!(
            "UPDATE {} SET status = $3, decided_by = $4, decided_at = $5, decision_comment = $6, \
             updated_at = $5 WHERE tenant_id = $1 AND id = $2 AND status = $7",
            TABLE_NAME
        );
        let result = sqlx::query(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(status)
            .bind(decided_by)
            .bind(timestamp)
            .bind(comment)
            .bind(RequestStatus::Pending)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn cancel(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveRequestId,
        employee_id: EmployeeId,
        timestamp: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let query = format!(
            "UPDATE {} SET status = $4, cancelled_at = $5, updated_at = $5 \
             WHERE tenant_id = $1 AND id = $2 AND employee_id = $3 AND status = $6",
            TABLE_NAME
        );
        let result = sqlx::query(&query)
            .bind(tenant_id)
            .bind(id)
            .bind(employee_id)
            .bind(RequestStatus::Cancelled)
            .bind(timestamp)
            .bind(RequestStatus::Pending)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn store_and_mock_share_the_injected_trait() {
        fn check_send_sync<T: Send + Sync + ?Sized>() {}
        check_send_sync::<dyn LeaveRequestRepositoryTrait>();

        let stores: [Arc<dyn LeaveRequestRepositoryTrait>; 2] = [
            Arc::new(LeaveRequestRepository::new()),
            Arc::new(MockLeaveRequestRepositoryTrait::new()),
        ];
        assert_eq!(stores.len(), 2);
    }
}
