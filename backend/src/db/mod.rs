//! PostgreSQL pool, migrations and the readiness probe

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const MIN_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Readiness answers within this even when the pool is exhausted
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Tables the service cannot run without
const REQUIRED_TABLES: [&str; 2] = ["meal_logs", "user_profile"];

/// Create the connection pool described by `config`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("invalid database url")?
        .application_name("diet-tracker");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect_with(connect_options)
        .await
        .context("failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}

/// Apply pending migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to run migrations")?;
    info!("Database migrations completed");
    Ok(())
}

/// Succeeds when the database answers and the schema is in place
pub async fn health_check(pool: &PgPool) -> Result<()> {
    let probe = async {
        for table in REQUIRED_TABLES {
            let present: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
                .bind(table)
                .fetch_one(pool)
                .await?;
            if !present {
                anyhow::bail!("table {table} is missing; migrations have not run");
            }
        }
        Ok::<(), anyhow::Error>(())
    };

    let result = match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("database did not answer within {PROBE_TIMEOUT:?}")),
    };
    if let Err(e) = &result {
        warn!("Database health check failed: {}", e);
    }
    result
}
