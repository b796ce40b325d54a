//! Leave balance store.
//!
//! Mutations are compare-and-swap on `version`: a `None` result from
//! [`LeaveBalanceRepositoryTrait::decrement`] or
//! [`LeaveBalanceRepositoryTrait::increment`] means another writer got there
//! first, or the bound check failed, and the caller must abort.

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::AppError;
use crate::models::leave_balance::{LeaveBalance, YearOpening};
use crate::repositories::common::{push_and, push_pagination, tenant_scoped};
use crate::types::{EmployeeId, LeaveBalanceId, LeaveCategoryId, LeaveDays, TenantId};

const TABLE_NAME: &str = "leave_balances";
const SELECT_COLUMNS: &str = "id, tenant_id, employee_id, category_id, year, allocated_half_days, \
                              carried_forward_half_days, remaining_half_days, version, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveBalanceRepositoryTrait: Send + Sync {
    async fn get_balance(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError>;

    /// `SELECT ... FOR UPDATE` on the (employee, category, year) row.
    async fn lock_balance(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError>;

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveBalanceId,
    ) -> Result<Option<LeaveBalance>, AppError>;

    async fn decrement(
        &self,
        conn: &mut PgConnection,
        id: LeaveBalanceId,
        amount: LeaveDays,
        expected_version: i32,
    ) -> Result<Option<LeaveBalance>, AppError>;

    async fn increment(
        &self,
        conn: &mut PgConnection,
        id: LeaveBalanceId,
        amount: LeaveDays,
        expected_version: i32,
    ) -> Result<Option<LeaveBalance>, AppError>;
}

/// An (employee, bounded category) pair without a balance for the year being
/// opened, with last year's remainder if there was one.
#[derive(Debug, Clone, FromRow)]
pub struct OpeningCandidate {
    pub employee_id: EmployeeId,
    pub category_id: LeaveCategoryId,
    pub annual_allocation_days: i32,
    pub previous_remaining: Option<LeaveDays>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LeaveBalanceRepository;

impl LeaveBalanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveBalanceId,
    ) -> Result<LeaveBalance, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave balance not found".into()))
    }

    pub async fn list_for_employee(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<Vec<LeaveBalance>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 AND year = $3 \
             ORDER BY category_id",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .bind(year)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Page of balances for a year, optionally for one employee, plus the total.
    pub async fn list(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        year: i32,
        employee_id: Option<EmployeeId>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LeaveBalance>, i64), AppError> {
        let mut builder = tenant_scoped(&format!("SELECT {}", SELECT_COLUMNS), TABLE_NAME, tenant_id);
        let mut count = tenant_scoped("SELECT COUNT(*)", TABLE_NAME, tenant_id);
        for b in [&mut builder, &mut count] {
            push_and(b);
            b.push("year = ");
            b.push_bind(year);
            if let Some(employee_id) = employee_id {
                push_and(b);
                b.push("employee_id = ");
                b.push_bind(employee_id);
            }
        }
        builder.push(" ORDER BY employee_id, category_id");
        push_pagination(&mut builder, limit, offset);

        let rows = builder.build_query_as::<LeaveBalance>().fetch_all(db).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
        Ok((rows, total))
    }

    pub async fn opening_candidates(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        year: i32,
    ) -> Result<Vec<OpeningCandidate>, AppError> {
        let rows = sqlx::query_as::<_, OpeningCandidate>(
            r#"
            SELECT e.id AS employee_id,
                   c.id AS category_id,
                   c.annual_allocation_days,
                   prev.remaining_half_days AS previous_remaining
            FROM employees e
            JOIN leave_categories c
              ON c.tenant_id = e.tenant_id AND c.active AND NOT c.unlimited
            LEFT JOIN leave_balances prev
              ON prev.tenant_id = e.tenant_id
             AND prev.employee_id = e.id
             AND prev.category_id = c.id
             AND prev.year = $2 - 1
            WHERE e.tenant_id = $1
              AND NOT EXISTS (
                SELECT 1 FROM leave_balances cur
                WHERE cur.employee_id = e.id AND cur.category_id = c.id AND cur.year = $2
              )
            "#,
        )
        .bind(tenant_id)
        .bind(year)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Inserts an opening balance; an existing row for the same key wins.
    pub async fn insert_opening(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        year: i32,
        opening: &YearOpening,
    ) -> Result<u64, AppError> {
        let query = format!(
            "INSERT INTO {} (id, tenant_id, employee_id, category_id, year, allocated_half_days, \
             carried_forward_half_days, remaining_half_days, version, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, NOW()) \
             ON CONFLICT (employee_id, category_id, year) DO NOTHING",
            TABLE_NAME
        );
        let result = sqlx::query(&query)
            .bind(LeaveBalanceId::new())
            .bind(tenant_id)
            .bind(employee_id)
            .bind(category_id)
            .bind(year)
            .bind(opening.allocated)
            .bind(opening.carried_forward)
            .bind(opening.remaining)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn record_adjustment(
        &self,
        conn: &mut PgConnection,
        balance: &LeaveBalance,
        delta: LeaveDays,
        reason: &str,
        adjusted_by: EmployeeId,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO leave_balance_adjustments \
             (id, tenant_id, balance_id, delta_half_days, reason, adjusted_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW())",
        )
        .bind(uuid::Uuid::new_v4())
        .bind(balance.tenant_id)
        .bind(balance.id)
        .bind(delta)
        .bind(reason)
        .bind(adjusted_by)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LeaveBalanceRepositoryTrait for LeaveBalanceRepository {
    async fn get_balance(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 AND category_id = $3 \
             AND year = $4",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .bind(category_id)
            .bind(year)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn lock_balance(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND employee_id = $2 AND category_id = $3 \
             AND year = $4 FOR UPDATE",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(tenant_id)
            .bind(employee_id)
            .bind(category_id)
            .bind(year)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveBalanceId,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2 FOR UPDATE",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn decrement(
        &self,
        conn: &mut PgConnection,
        id: LeaveBalanceId,
        amount: LeaveDays,
        expected_version: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let query = format!(
            "UPDATE {} SET remaining_half_days = remaining_half_days - $2, \
             version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $3 AND remaining_half_days >= $2 \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(id)
            .bind(amount)
            .bind(expected_version)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn increment(
        &self,
        conn: &mut PgConnection,
        id: LeaveBalanceId,
        amount: LeaveDays,
        expected_version: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let query = format!(
            "UPDATE {} SET remaining_half_days = remaining_half_days + $2, \
             version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $3 \
               AND remaining_half_days + $2 <= allocated_half_days + carried_forward_half_days \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(id)
            .bind(amount)
            .bind(expected_version)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn store_and_mock_share_the_injected_trait() {
        fn check_send_sync<T: Send + Sync + ?Sized>() {}
        check_send_sync::<dyn LeaveBalanceRepositoryTrait>();

        let stores: [Arc<dyn LeaveBalanceRepositoryTrait>; 2] = [
            Arc::new(LeaveBalanceRepository::new()),
            Arc::new(MockLeaveBalanceRepositoryTrait::new()),
        ];
        assert_eq!(stores.len(), 2);
    }
}
