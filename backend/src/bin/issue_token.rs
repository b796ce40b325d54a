//! Mints access tokens for existing employees, or bootstraps a tenant with
//! its first admin.
//!
//! ```text
//! issue_token --tenant <uuid> --employee <uuid>
//! issue_token --bootstrap --tenant-name Acme --admin-name "Ada L" --admin-email ada@acme.test [--time-zone Asia/Tokyo]
//! ```

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use hrdesk_backend::{
    config::Config,
    db::connection::create_pool,
    models::{
        employee::{Employee, EmployeeRole},
        tenant::Tenant,
    },
    repositories::{begin_transaction, EmployeeRepository, Repository, TenantRepository},
    types::{EmployeeId, TenantId},
    utils::jwt::create_access_token,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let args = parse_args(std::env::args().skip(1))?;
    let pool = create_pool(&config.database_url, 2).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let employee = if args.contains_key("bootstrap") {
        let tenant_name = required(&args, "tenant-name")?;
        let admin_name = required(&args, "admin-name")?;
        let admin_email = required(&args, "admin-email")?;
        let zone: Tz = match args.get("time-zone") {
            Some(name) => name
                .parse()
                .map_err(|_| anyhow!("Invalid --time-zone value: {}", name))?,
            None => config.time_zone,
        };

        let tenant = Tenant::new(tenant_name.to_string(), zone);
        let admin = Employee::new(
            tenant.id,
            admin_name.to_string(),
            admin_email.to_ascii_lowercase(),
            EmployeeRole::Admin,
            None,
            None,
        );

        // Tenant and admin land together or not at all.
        let mut tx = begin_transaction(&pool)
            .await
            .map_err(|e| anyhow!("Failed to begin transaction: {:?}", e))?;
        TenantRepository::new()
            .insert_in_tx(&mut tx, &tenant)
            .await
            .map_err(|e| anyhow!("Failed to insert tenant: {:?}", e))?;
        EmployeeRepository::new()
            .insert_in_tx(&mut tx, &admin)
            .await
            .map_err(|e| anyhow!("Failed to insert admin: {:?}", e))?;
        tx.commit().await?;

        println!("tenant_id={}", tenant.id);
        println!("employee_id={}", admin.id);
        admin
    } else {
        let tenant_id: TenantId = required(&args, "tenant")?
            .parse()
            .context("--tenant must be a UUID")?;
        let employee_id: EmployeeId = required(&args, "employee")?
            .parse()
            .context("--employee must be a UUID")?;
        EmployeeRepository::new()
            .find_by_id(&pool, tenant_id, employee_id)
            .await
            .map_err(|_| anyhow!("Employee {} not found in tenant {}", employee_id, tenant_id))?
    };

    let token = create_access_token(
        employee.id,
        employee.tenant_id,
        employee.role,
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;
    println!("token={}", token);
    Ok(())
}

/// `--key value` pairs; a flag followed by another flag (or nothing) maps to "".
fn parse_args(raw: impl Iterator<Item = String>) -> anyhow::Result<HashMap<String, String>> {
    let mut args = HashMap::new();
    let mut raw = raw.peekable();
    while let Some(item) = raw.next() {
        let key = item
            .strip_prefix("--")
            .ok_or_else(|| anyhow!("Unexpected argument: {}", item))?
            .to_string();
        let value = match raw.peek() {
            Some(next) if !next.starts_with("--") => raw.next().unwrap_or_default(),
            _ => String::new(),
        };
        args.insert(key, value);
    }
    Ok(args)
}

fn required<'a>(args: &'a HashMap<String, String>, key: &str) -> anyhow::Result<&'a str> {
    args.get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing --{}", key))
}
