//! Shared repository utilities.

use sqlx::{Postgres, QueryBuilder};

use crate::types::TenantId;

/// Starts `{head} FROM {table} WHERE tenant_id = $1`; callers append further
/// conditions with [`push_and`].
pub fn tenant_scoped<'a>(head: &str, table: &str, tenant_id: TenantId) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("{} FROM {} WHERE tenant_id = ", head, table));
    builder.push_bind(tenant_id);
    builder
}

pub fn push_and(builder: &mut QueryBuilder<'_, Postgres>) {
    builder.push(" AND ");
}

pub fn push_pagination(builder: &mut QueryBuilder<'_, Postgres>, limit: i64, offset: i64) {
    builder.push(" LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
}
