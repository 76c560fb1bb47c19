//! Database module
//!
//! Connection pool, embedded schema migration and schema checks.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use crate::config::Config;

/// Initial schema: the `wallets` table
const MIGRATION_001_CREATE_WALLETS: &str = include_str!("../migrations/001_create_wallets.sql");

/// Create the connection pool shared by all requests
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.store_timeout.max(Duration::from_secs(1)))
        .connect_with(config.database.clone())
        .await
}

/// Apply the embedded migrations. Safe to run repeatedly.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    // No bind parameters, so this goes over the simple query protocol
    pool.execute(MIGRATION_001_CREATE_WALLETS).await?;

    tracing::info!("Database migrations applied");
    Ok(())
}

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = ["wallets"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_guards_balance() {
        assert!(MIGRATION_001_CREATE_WALLETS.contains("CREATE TABLE IF NOT EXISTS wallets"));
        assert!(MIGRATION_001_CREATE_WALLETS.contains("CHECK (balance >= 0)"));
    }
}
