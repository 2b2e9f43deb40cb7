//! PostgreSQL pool setup
//!
//! The log collections live in Postgres behind the repository layer. Pool
//! sizing and the acquire timeout come from [`DatabaseConfig`]; idle and
//! lifetime limits are fixed here so every environment recycles connections
//! the same way.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Open the connection pool described by `config`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options =
        PgConnectOptions::from_str(&config.url)?.application_name("greasing-the-groove");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(options)
        .await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Apply pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("migrations up to date");
    Ok(())
}

/// One-shot connectivity probe for the readiness endpoint
pub async fn ping(pool: &PgPool) -> Result<()> {
    if let Err(err) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %err, "database ping failed");
        return Err(err.into());
    }
    Ok(())
}
