//! Exit and onboarding records: creation and guarded status moves.
//!
//! Every move is checked against the [`Progression`] table first, then written
//! with a compare-and-swap on the status the caller saw.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::error::{AppError, LeaveError};
use crate::models::{
    employee::Employee,
    exit_request::{CreateExitPayload, ExitRequest, ExitStatus},
    onboarding::{CreateOnboardingPayload, OnboardingRecord, OnboardingStatus},
};
use crate::repositories::{EmployeeRepository, ExitRequestRepository, OnboardingRepository};
use crate::services::progress::{exit_step_allowed, ExitActor, Progression};
use crate::types::{ExitRequestId, OnboardingId};

#[derive(Clone)]
pub struct LifecycleService {
    pool: PgPool,
    exits: ExitRequestRepository,
    onboarding: OnboardingRepository,
    employees: EmployeeRepository,
}

impl LifecycleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            exits: ExitRequestRepository::new(),
            onboarding: OnboardingRepository::new(),
            employees: EmployeeRepository::new(),
        }
    }

    /// Opens an exit request. An employee may have only one open at a time.
    pub async fn open_exit(
        &self,
        actor: &Employee,
        payload: CreateExitPayload,
        today: NaiveDate,
    ) -> Result<ExitRequest, AppError> {
        if payload.last_working_day < today {
            return Err(AppError::BadRequest(
                "last_working_day must not be in the past".into(),
            ));
        }
        if let Some(open) = self
            .exits
            .find_open_for_employee(&self.pool, actor.tenant_id, actor.id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Exit request {} is already {}",
                open.id, open.status
            )));
        }

        let reason = payload
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let request = ExitRequest::new(actor.tenant_id, actor.id, payload.last_working_day, reason);
        let saved = self.exits.create(&self.pool, &request).await?;
        tracing::info!(
            tenant_id = %saved.tenant_id,
            employee_id = %saved.employee_id,
            exit_id = %saved.id,
            "exit request opened"
        );
        Ok(saved)
    }

    pub async fn advance_exit(
        &self,
        actor: &Employee,
        id: ExitRequestId,
        next: ExitStatus,
    ) -> Result<ExitRequest, AppError> {
        let request = self.exits.find_by_id(&self.pool, actor.tenant_id, id).await?;
        let next = check_exit_step(&request, actor, next)?;

        let updated = self
            .exits
            .update_status(
                &self.pool,
                actor.tenant_id,
                id,
                request.status,
                next,
                actor.id,
                Utc::now(),
            )
            .await?
            .ok_or_else(|| {
                LeaveError::ConcurrencyConflict("exit request changed during update".into())
            })?;

        tracing::info!(
            tenant_id = %actor.tenant_id,
            exit_id = %id,
            from = %request.status,
            to = %updated.status,
            "exit request advanced"
        );
        Ok(updated)
    }

    pub async fn start_onboarding(
        &self,
        actor: &Employee,
        payload: CreateOnboardingPayload,
    ) -> Result<OnboardingRecord, AppError> {
        if !self
            .employees
            .exists(&self.pool, actor.tenant_id, payload.employee_id)
            .await?
        {
            return Err(AppError::NotFound("Employee not found".into()));
        }

        let notes = payload
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let record = OnboardingRecord::new(
            actor.tenant_id,
            payload.employee_id,
            payload.start_date,
            notes,
        );
        let saved = self.onboarding.create(&self.pool, &record).await?;
        tracing::info!(
            tenant_id = %saved.tenant_id,
            employee_id = %saved.employee_id,
            onboarding_id = %saved.id,
            "onboarding started"
        );
        Ok(saved)
    }

    pub async fn advance_onboarding(
        &self,
        actor: &Employee,
        id: OnboardingId,
        next: OnboardingStatus,
        notes: Option<String>,
    ) -> Result<OnboardingRecord, AppError> {
        let record = self
            .onboarding
            .find_by_id(&self.pool, actor.tenant_id, id)
            .await?;
        let next = record.status.transition(next)?;

        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let updated = self
            .onboarding
            .update_status(
                &self.pool,
                actor.tenant_id,
                id,
                record.status,
                next,
                notes,
                actor.id,
                Utc::now(),
            )
            .await?
            .ok_or_else(|| {
                LeaveError::ConcurrencyConflict("onboarding record changed during update".into())
            })?;

        tracing::info!(
            tenant_id = %actor.tenant_id,
            onboarding_id = %id,
            from = %record.status,
            to = %updated.status,
            "onboarding advanced"
        );
        Ok(updated)
    }
}

/// Who may take the step, then whether the table allows it.
fn check_exit_step(
    request: &ExitRequest,
    actor: &Employee,
    next: ExitStatus,
) -> Result<ExitStatus, AppError> {
    let is_owner = request.employee_id == actor.id;
    let role = if is_owner {
        ExitActor::Owner
    } else if actor.is_approver() {
        ExitActor::Approver
    } else {
        return Err(AppError::Forbidden("Not allowed to update this exit request".into()));
    };

    if !exit_step_allowed(next, role) {
        let message = if is_owner {
            "Employees cannot approve or process their own exit request"
        } else {
            "Only the employee can withdraw an exit request"
        };
        return Err(AppError::Forbidden(message.into()));
    }

    Ok(request.status.transition(next)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::EmployeeRole;
    use crate::types::TenantId;

    fn employee(tenant: TenantId, role: EmployeeRole) -> Employee {
        Employee::new(tenant, "E".into(), "e@x.test".into(), role, None, None)
    }

    fn exit_for(owner: &Employee, status: ExitStatus) -> ExitRequest {
        let mut request = ExitRequest::new(
            owner.tenant_id,
            owner.id,
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            None,
        );
        request.status = status;
        request
    }

    #[test]
    fn owner_can_withdraw_but_not_approve() {
        let tenant = TenantId::new();
        let owner = employee(tenant, EmployeeRole::Manager);
        let request = exit_for(&owner, ExitStatus::PendingManager);

        assert_eq!(
            check_exit_step(&request, &owner, ExitStatus::Withdrawn).unwrap(),
            ExitStatus::Withdrawn
        );
        assert!(matches!(
            check_exit_step(&request, &owner, ExitStatus::ManagerApproved),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn approver_moves_forward_but_cannot_withdraw() {
        let tenant = TenantId::new();
        let owner = employee(tenant, EmployeeRole::Employee);
        let manager = employee(tenant, EmployeeRole::Manager);
        let request = exit_for(&owner, ExitStatus::PendingManager);

        assert!(check_exit_step(&request, &manager, ExitStatus::ManagerApproved).is_ok());
        assert!(matches!(
            check_exit_step(&request, &manager, ExitStatus::Withdrawn),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn plain_employee_cannot_touch_someone_elses_exit() {
        let tenant = TenantId::new();
        let owner = employee(tenant, EmployeeRole::Employee);
        let peer = employee(tenant, EmployeeRole::Employee);
        let request = exit_for(&owner, ExitStatus::PendingManager);
        assert!(matches!(
            check_exit_step(&request, &peer, ExitStatus::ManagerApproved),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn late_withdrawal_is_an_invalid_transition() {
        let tenant = TenantId::new();
        let owner = employee(tenant, EmployeeRole::Employee);
        let request = exit_for(&owner, ExitStatus::HrProcessing);
        assert!(matches!(
            check_exit_step(&request, &owner, ExitStatus::Withdrawn),
            Err(AppError::Leave(LeaveError::InvalidTransition { .. }))
        ));
    }
}
