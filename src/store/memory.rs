//! In-memory balance store
//!
//! Every primitive runs under a single lock, which gives the same
//! per-call atomicity as a one-statement SQL update. Used by tests and
//! local demos; balances do not survive the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{BalanceStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    wallets: Mutex<HashMap<Uuid, i64>>,
    calls: AtomicUsize,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, i64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // A panic while holding the lock cannot leave a half-applied
        // mutation behind, so the map is still consistent.
        self.wallets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BalanceStore for InMemoryBalanceStore {
    async fn insert(&self, wallet_id: Uuid, initial_balance: i64) -> StoreResult<u64> {
        let mut wallets = self.lock();
        if wallets.contains_key(&wallet_id) {
            return Err(StoreError::UniqueViolation);
        }
        wallets.insert(wallet_id, initial_balance);
        Ok(1)
    }

    async fn add(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        let mut wallets = self.lock();
        let Some(balance) = wallets.get_mut(&wallet_id) else {
            return Ok(0);
        };
        *balance = balance
            .checked_add(delta)
            .ok_or(StoreError::Overflow(wallet_id))?;
        Ok(1)
    }

    async fn subtract_if_sufficient(&self, wallet_id: Uuid, delta: i64) -> StoreResult<u64> {
        let mut wallets = self.lock();
        match wallets.get_mut(&wallet_id) {
            Some(balance) if *balance >= delta => {
                *balance -= delta;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn read(&self, wallet_id: Uuid) -> StoreResult<Option<i64>> {
        Ok(self.lock().get(&wallet_id).copied())
    }

    async fn exists(&self, wallet_id: Uuid) -> StoreResult<bool> {
        Ok(self.lock().contains_key(&wallet_id))
    }
}
