//! Holiday repository.
//!
//! Provides CRUD operations for a tenant's holiday calendar.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::holiday::Holiday;
use crate::repositories::repository::Repository;
use crate::types::{HolidayId, TenantId};

const TABLE_NAME: &str = "holidays";
const SELECT_COLUMNS: &str =
    "id, tenant_id, holiday_date, name, description, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct HolidayRepository;

impl HolidayRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_date(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        date: NaiveDate,
    ) -> Result<Option<Holiday>, AppError> {
        let query = format!(
            "{} WHERE tenant_id = $1 AND holiday_date = $2",
            Self::base_select_query()
        );
        let row = sqlx::query_as::<_, Holiday>(&query)
            .bind(tenant_id)
            .bind(date)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn find_in_year(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        year: i32,
    ) -> Result<Vec<Holiday>, AppError> {
        let query = format!(
            "{} WHERE tenant_id = $1 AND EXTRACT(YEAR FROM holiday_date)::INT = $2 \
             ORDER BY holiday_date ASC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Holiday>(&query)
            .bind(tenant_id)
            .bind(year)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

impl Repository<Holiday> for HolidayRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = HolidayId;

    async fn find_all(&self, db: &PgPool, tenant_id: TenantId) -> Result<Vec<Holiday>, AppError> {
        let query = format!(
            "{} WHERE tenant_id = $1 ORDER BY holiday_date ASC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Holiday>(&query)
            .bind(tenant_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: HolidayId,
    ) -> Result<Holiday, AppError> {
        let query = format!("{} WHERE tenant_id = $1 AND id = $2", Self::base_select_query());
        let result = sqlx::query_as::<_, Holiday>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Holiday not found".into()))?;
        Ok(result)
    }

    async fn create(&self, db: &PgPool, item: &Holiday) -> Result<Holiday, AppError> {
        let query = format!(
            "INSERT INTO {} (id, tenant_id, holiday_date, name, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Holiday>(&query)
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(item.holiday_date)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Holiday) -> Result<Holiday, AppError> {
        let query = format!(
            "UPDATE {} SET holiday_date = $3, name = $4, description = $5, updated_at = $6 \
             WHERE tenant_id = $1 AND id = $2 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, Holiday>(&query)
            .bind(item.tenant_id)
            .bind(item.id)
            .bind(item.holiday_date)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.updated_at)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Holiday not found".into()))
    }

    async fn delete(&self, db: &PgPool, tenant_id: TenantId, id: HolidayId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE tenant_id = $1 AND id = $2", TABLE_NAME);
        let result = sqlx::query(&query)
            .bind(tenant_id)
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Holiday not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holiday_select_columns_include_tenant() {
        assert!(SELECT_COLUMNS.starts_with("id, tenant_id"));
        assert!(SELECT_COLUMNS.contains("holiday_date"));
    }
}
