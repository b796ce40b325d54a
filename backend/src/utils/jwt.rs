use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::employee::EmployeeRole;
use crate::types::{EmployeeId, TenantId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: EmployeeId,
    pub tenant_id: TenantId,
    /// Role at issue time. Authorization re-reads the stored role.
    pub role: EmployeeRole,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn new(
        employee_id: EmployeeId,
        tenant_id: TenantId,
        role: EmployeeRole,
        expiration_hours: u64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: employee_id,
            tenant_id,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

pub fn create_access_token(
    employee_id: EmployeeId,
    tenant_id: TenantId,
    role: EmployeeRole,
    secret: &str,
    expiration_hours: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(employee_id, tenant_id, role, expiration_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_round_trips_identity() {
        let employee = EmployeeId::new();
        let tenant = TenantId::new();
        let token = create_access_token(employee, tenant, EmployeeRole::Hr, "secret", 1)
            .expect("create token");
        let claims = verify_access_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, employee);
        assert_eq!(claims.tenant_id, tenant);
        assert_eq!(claims.role, EmployeeRole::Hr);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_access_token(
            EmployeeId::new(),
            TenantId::new(),
            EmployeeRole::Employee,
            "secret",
            1,
        )
        .expect("create token");
        assert!(verify_access_token(&token, "other").is_err());
    }
}
