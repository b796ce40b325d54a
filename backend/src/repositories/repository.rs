//! Repository trait and common functionality
//!
//! Every table except `tenants` is tenant-scoped, so lookups and deletes take
//! the tenant alongside the primary key.

use crate::error::AppError;
use crate::types::TenantId;
use sqlx::PgPool;

/// Standard CRUD surface for tenant-owned records.
#[allow(async_fn_in_trait)]
pub trait Repository<T> {
    /// Target table name.
    const TABLE: &'static str;
    /// Primary key type for the record.
    type Id;

    async fn find_all(&self, db: &PgPool, tenant_id: TenantId) -> Result<Vec<T>, AppError>;

    /// Fails with `NotFound` when the id does not exist for this tenant.
    async fn find_by_id(&self, db: &PgPool, tenant_id: TenantId, id: Self::Id)
        -> Result<T, AppError>;

    async fn create(&self, db: &PgPool, item: &T) -> Result<T, AppError>;

    async fn update(&self, db: &PgPool, item: &T) -> Result<T, AppError>;

    async fn delete(&self, db: &PgPool, tenant_id: TenantId, id: Self::Id) -> Result<(), AppError>;
}
