use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::TenantId;
use crate::utils::time::resolve_zone;

/// An organisation using the service. Its time zone decides what "today" is.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, time_zone: Tz) -> Self {
        Self {
            id: TenantId::new(),
            name,
            time_zone: time_zone.name().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn zone(&self, fallback: Tz) -> Tz {
        resolve_zone(&self.time_zone, fallback)
    }
}
