//! PostgreSQL balance store
//!
//! Each primitive is one autocommit statement, so PostgreSQL row locking
//! serializes concurrent mutations of the same wallet.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BalanceStore, StoreError, StoreResult};

/// SQLSTATE unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE numeric_value_out_of_range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Balance store backed by the `wallets` table
#[derive(Debug, Clone)]
pub struct PgBalanceStore {
    pool: PgPool,
}

impl PgBalanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map driver errors carrying a known SQLSTATE onto store errors
fn classify(wallet_id: Uuid, err: sqlx::Error) -> StoreError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => StoreError::UniqueViolation,
        Some(NUMERIC_OUT_OF_RANGE) => StoreError::Overflow(wallet_id),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl BalanceStore for PgBalanceStore {
    async fn insert(&self, wallet_id: Uuid, initial_balance: i64) -> StoreResult<u64> {
        let rows_affected = sqlx::query("INSERT INTO wallets (id, balance) VALUES ($1, $2)")
            .bind(wallet_id)
            .bind(initial_balance)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(wallet_id, e))?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn add(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE wallets
            SET
                balance = balance + $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(wallet_id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(wallet_id, e))?
        .rows_affected();

        Ok(rows_affected)
    }

    async fn subtract_if_sufficient(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        // The guard is re-evaluated against the latest committed row after
        // waiting on a concurrent writer's lock, so two withdrawals can never
        // both pass it on a stale balance.
        let rows_affected = sqlx::query(
            r#"
            UPDATE wallets
            SET
                balance = balance - $2,
                updated_at = NOW()
            WHERE id = $1 AND balance >= $2
            "#,
        )
        .bind(wallet_id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(wallet_id, e))?
        .rows_affected();

        Ok(rows_affected)
    }

    async fn read(&self, wallet_id: Uuid) -> StoreResult<Option<i64>> {
        let balance: Option<i64> = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
            .bind(wallet_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(balance)
    }

    async fn exists(&self, wallet_id: Uuid) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM wallets WHERE id = $1)")
                .bind(wallet_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
