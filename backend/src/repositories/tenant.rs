use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::error::AppError;
use crate::models::tenant::Tenant;
use crate::types::TenantId;

const TABLE_NAME: &str = "tenants";
const SELECT_COLUMNS: &str = "id, name, time_zone, created_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct TenantRepository;

impl TenantRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(&self, db: &PgPool, id: TenantId) -> Result<Tenant, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant not found".into()))
    }

    pub async fn create(&self, db: &PgPool, tenant: &Tenant) -> Result<Tenant, AppError> {
        insert(db, tenant).await
    }

    /// Same as [`Self::create`], inside the caller's transaction.
    pub async fn insert_in_tx(
        &self,
        conn: &mut PgConnection,
        tenant: &Tenant,
    ) -> Result<Tenant, AppError> {
        insert(&mut *conn, tenant).await
    }
}

async fn insert<'e, E>(db: E, tenant: &Tenant) -> Result<Tenant, AppError>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO {} (id, name, time_zone, created_at) VALUES ($1, $2, $3, $4) RETURNING {}",
        TABLE_NAME, SELECT_COLUMNS
    );
    let row = sqlx::query_as::<_, Tenant>(&query)
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.time_zone)
        .bind(tenant.created_at)
        .fetch_one(db)
        .await?;
    Ok(row)
}
