//! Employee repository.

use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::error::AppError;
use crate::models::employee::Employee;
use crate::repositories::repository::Repository;
use crate::types::{EmployeeId, TenantId};

const TABLE_NAME: &str = "employees";
const SELECT_COLUMNS: &str =
    "id, tenant_id, full_name, email, role, manager_id, joined_on, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeeRepository;

impl EmployeeRepository {
    pub fn new() -> Self {
        Self
    }

    /// Used by authentication, where a missing row means the token is stale.
    pub async fn find_optional(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: EmployeeId,
    ) -> Result<Option<Employee>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 AND id = $2",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, Employee>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    /// Inserts inside the caller's transaction; used when bootstrapping a tenant.
    pub async fn insert_in_tx(
        &self,
        conn: &mut PgConnection,
        item: &Employee,
    ) -> Result<Employee, AppError> {
        insert(&mut *conn, item).await
    }

    pub async fn exists(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: EmployeeId,
    ) -> Result<bool, AppError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE tenant_id = $1 AND id = $2)",
            TABLE_NAME
        );
        let exists = sqlx::query_scalar::<_, bool>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(exists)
    }
}

impl Repository<Employee> for EmployeeRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = EmployeeId;

    async fn find_all(&self, db: &PgPool, tenant_id: TenantId) -> Result<Vec<Employee>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1 ORDER BY full_name ASC",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, Employee>(&query)
            .bind(tenant_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        tenant_id: TenantId,
        id: EmployeeId,
    ) -> Result<Employee, AppError> {
        self.find_optional(db, tenant_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Employee) -> Result<Employee, AppError> {
        insert(db, item).await
    }

    async fn update(&self, db: &PgPool, item: &Employee) -> Result<Employee, AppError> {
        let query = format!(
            "UPDATE {} SET full_name = $3, email = $4, role = $5, manager_id = $6, joined_on = $7, \
             updated_at = $8 WHERE tenant_id = $1 AND id = $2 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(item.tenant_id)
            .bind(item.id)
            .bind(&item.full_name)
            .bind(&item.email)
            .bind(item.role)
            .bind(item.manager_id)
            .bind(item.joined_on)
            .bind(item.updated_at)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    async fn delete(&self, db: &PgPool, tenant_id: TenantId, id: EmployeeId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE tenant_id = $1 AND id = $2", TABLE_NAME);
        sqlx::query(&query).bind(tenant_id).bind(id).execute(db).await?;
        Ok(())
    }
}

async fn insert<'e, E>(db: E, item: &Employee) -> Result<Employee, AppError>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO {} (id, tenant_id, full_name, email, role, manager_id, joined_on, \
         created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
        TABLE_NAME, SELECT_COLUMNS
    );
    let row = sqlx::query_as::<_, Employee>(&query)
        .bind(item.id)
        .bind(item.tenant_id)
        .bind(&item.full_name)
        .bind(&item.email)
        .bind(item.role)
        .bind(item.manager_id)
        .bind(item.joined_on)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(db)
        .await?;
    Ok(row)
}
