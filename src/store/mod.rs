//! Balance Store module
//!
//! Durable `(wallet_id -> balance)` storage with atomic conditional
//! mutation primitives. The ledger core delegates all concurrency control
//! to implementations of [`BalanceStore`].

mod error;
mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBalanceStore;
pub use postgres::PgBalanceStore;

/// Storage primitives consumed by the ledger core.
///
/// Every mutating method must be a single atomic operation in the backing
/// store and report how many wallets it affected (0 or 1).
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Insert a new wallet. Fails with `StoreError::UniqueViolation` if the
    /// id is taken.
    async fn insert(&self, wallet_id: Uuid, initial_balance: i64) -> StoreResult<u64>;

    /// Add `delta` to the balance of an existing wallet.
    async fn add(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64>;

    /// Subtract `delta` only if the wallet exists and its balance covers it.
    async fn subtract_if_sufficient(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64>;

    /// Read the current balance, `None` if the wallet does not exist.
    async fn read(&self, wallet_id: Uuid) -> StoreResult<Option<i64>>;

    async fn exists(&self, wallet_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
impl<S: BalanceStore + ?Sized> BalanceStore for Arc<S> {
    async fn insert(&self, wallet_id: Uuid, initial_balance: i64) -> StoreResult<u64> {
        (**self).insert(wallet_id, initial_balance).await
    }

    async fn add(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        (**self).add(wallet_id, delta).await
    }

    async fn subtract_if_sufficient(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        (**self).subtract_if_sufficient(wallet_id, delta).await
    }

    async fn read(&self, wallet_id: Uuid) -> StoreResult<Option<i64>> {
        (**self).read(wallet_id).await
    }

    async fn exists(&self, wallet_id: Uuid) -> StoreResult<bool> {
        (**self).exists(wallet_id).await
    }
}
