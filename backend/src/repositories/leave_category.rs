//! Leave category repository.

use sqlx::{PgConnection, PgPool};

use crate::error::AppError;
use crate::models::leave_category::LeaveCategory;
use crate::repositories::repository::Repository;
use crate::types::{LeaveCategoryId, TenantId};

const TABLE_NAME: &str = "leave_categories";
const SELECT_COLUMNS: &str = "id, tenant_id, code, name, annual_allocation_days, unlimited, \
                              active, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct LeaveCategoryRepository;

impl LeaveCategoryRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_active(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
    ) -> Result<Vec<LeaveCategory>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND active ORDER BY code ASC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(tenant_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Same lookup as [`Repository::find_by_id`], on an open transaction.
    pub async fn find_in_tx(
        &self,
        conn: &mut PgConnection,
        tenant_id: TenantId,
        id: LeaveCategoryId,
    ) -> Result<LeaveCategory, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave category not found".into()))
    }
}

impl Repository<LeaveCategory> for LeaveCategoryRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = LeaveCategoryId;

    async fn find_all(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
    ) -> Result<Vec<LeaveCategory>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 ORDER BY code ASC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(tenant_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveCategoryId,
    ) -> Result<LeaveCategory, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave category not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &LeaveCategory) -> Result<LeaveCategory, AppError> {
        let query = format!(
            "INSERT INTO {} (id, tenant_id, code, name, annual_allocation_days, unlimited, active, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(&item.code)
            .bind(&item.name)
            .bind(item.annual_allocation_days)
            .bind(item.unlimited)
            .bind(item.active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &LeaveCategory) -> Result<LeaveCategory, AppError> {
        let query = format!(
            "UPDATE {} SET name = $3, annual_allocation_days = $4, unlimited = $5, active = $6, \
             updated_at = $7 WHERE tenant_id = $1 AND id = $2 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, LeaveCategory>(&query)
            .bind(item.tenant_id)
            .bind(item.id)
            .bind(&item.name)
            .bind(item.annual_allocation_days)
            .bind(item.unlimited)
            .bind(item.active)
            .bind(item.updated_at)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Leave category not found".into()))
    }

    async fn delete(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: LeaveCategoryId,
    ) -> Result<(), AppError> {
        // Categories referenced by requests are deactivated instead of deleted.
        let query = format!(
            "UPDATE {} SET active = FALSE, updated_at = NOW() WHERE tenant_id = $1 AND id = $2",
            TABLE_NAME
        );
        sqlx::query(&query).bind(tenant_id).bind(id).execute(db).await?;
        Ok(())
    }
}
