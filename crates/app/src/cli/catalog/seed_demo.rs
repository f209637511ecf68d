use cakeshop_app::{
    database::{self, Db},
    domain::tenants::records::TenantUuid,
};
use clap::Args;
use sqlx::{query_scalar, raw_sql};
use uuid::Uuid;

const DEMO_CATALOG_SQL: &str = include_str!("sql/demo_catalog.sql");

#[derive(Debug, Args)]
pub(crate) struct SeedDemoArgs {
    /// Tenant that receives the demo catalog
    #[arg(long, env = "DEFAULT_TENANT_UUID")]
    tenant_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedDemoArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let tenant = TenantUuid::from_uuid(args.tenant_uuid);

    let mut tx = db
        .begin_tenant_transaction(tenant)
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let seeded: bool = query_scalar(
        "SELECT EXISTS (SELECT 1 FROM products WHERE tenant_uuid = current_tenant_uuid())",
    )
    .fetch_one(&mut *tx)
    .await
    .map_err(|error| format!("failed to inspect catalog: {error}"))?;

    if seeded {
        return Err(format!("tenant {tenant} already has products"));
    }

    raw_sql(DEMO_CATALOG_SQL)
        .execute(&mut *tx)
        .await
        .map_err(|error| format!("failed to seed catalog: {error}"))?;

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit catalog: {error}"))?;

    println!("seeded demo catalog for tenant {tenant}");

    Ok(())
}
