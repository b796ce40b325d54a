//! Balance administration: opening a new leave year and manual adjustments.

use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, LeaveError};
use crate::models::{
    employee::Employee,
    leave_balance::{LeaveBalance, YearOpening},
};
use crate::repositories::{
    begin_transaction, finish_transaction, LeaveBalanceRepository, LeaveBalanceRepositoryTrait,
    LeavePolicyRepository,
};
use crate::types::{LeaveBalanceId, LeaveDays, TenantId};

#[derive(Clone)]
pub struct BalanceService {
    pool: PgPool,
    store: LeaveBalanceRepository,
    policies: LeavePolicyRepository,
}

impl BalanceService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            store: LeaveBalanceRepository::new(),
            policies: LeavePolicyRepository::new(),
        }
    }

    /// Creates balances for `year` for every employee and bounded, active
    /// category that lacks one. Returns how many rows were created; running
    /// it again creates nothing.
    pub async fn open_year(&self, tenant_id: TenantId, year: i32) -> Result<u64, AppError> {
        let policy = self.policies.get_or_default(&self.pool, tenant_id).await?;
        let carry_cap = policy.carry_forward_cap();

        let mut tx = begin_transaction(&self.pool).await?;
        let outcome = self.open_year_in(&mut tx, tenant_id, year, carry_cap).await;
        let created = finish_transaction(tx, outcome).await?;

        tracing::info!(tenant_id = %tenant_id, year, created, "leave year opened");
        Ok(created)
    }

    async fn open_year_in(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        year: i32,
        carry_cap: LeaveDays,
    ) -> Result<u64, AppError> {
        let candidates = self.store.opening_candidates(conn, tenant_id, year).await?;
        let mut created = 0;
        for candidate in candidates {
            let opening = YearOpening::compute(
                LeaveDays::from_days(candidate.annual_allocation_days.max(0)),
                candidate.previous_remaining,
                carry_cap,
            );
            created += self
                .store
                .insert_opening(
                    conn,
                    tenant_id,
                    candidate.employee_id,
                    candidate.category_id,
                    year,
                    &opening,
                )
                .await?;
        }
        Ok(created)
    }

    /// Credits (positive `delta`) or debits (negative `delta`) a balance.
    /// The result must stay within `0 ..= allocated + carried_forward`.
    pub async fn adjust(
        &self,
        actor: &Employee,
        id: LeaveBalanceId,
        delta: LeaveDays,
        reason: &str,
    ) -> Result<LeaveBalance, AppError> {
        if delta == LeaveDays::ZERO {
            return Err(AppError::BadRequest("Adjustment must not be zero".into()));
        }

        let mut tx = begin_transaction(&self.pool).await?;
        let outcome = self.adjust_locked(&mut tx, actor, id, delta, reason).await;
        let balance = finish_transaction(tx, outcome).await?;

        tracing::info!(
            tenant_id = %actor.tenant_id,
            balance_id = %id,
            delta = %delta,
            adjusted_by = %actor.id,
            "leave balance adjusted"
        );
        Ok(balance)
    }

    async fn adjust_locked(
        &self,
        conn: &mut PgConnection,
        actor: &Employee,
        id: LeaveBalanceId,
        delta: LeaveDays,
        reason: &str,
    ) -> Result<LeaveBalance, AppError> {
        let balance = self
            .store
            .lock_by_id(conn, actor.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave balance not found".into()))?;
        check_adjustment(&balance, delta)?;

        let updated = if delta.is_positive() {
            self.store
                .increment(conn, balance.id, delta, balance.version)
                .await?
        } else {
            self.store
                .decrement(conn, balance.id, LeaveDays::ZERO - delta, balance.version)
                .await?
        };
        let updated = updated.ok_or_else(|| {
            LeaveError::ConcurrencyConflict("leave balance changed during adjustment".into())
        })?;

        self.store
            .record_adjustment(conn, &balance, delta, reason.trim(), actor.id)
            .await?;
        Ok(updated)
    }
}

fn check_adjustment(balance: &LeaveBalance, delta: LeaveDays) -> Result<(), LeaveError> {
    if balance.accepts_delta(delta) {
        return Ok(());
    }
    if delta.is_negative() {
        Err(LeaveError::InsufficientBalance {
            requested: LeaveDays::ZERO - delta,
            remaining: balance.remaining,
        })
    } else {
        Err(LeaveError::PolicyViolation(format!(
            "balance cannot exceed {} day(s)",
            balance.ceiling()
        )))
    }
}
