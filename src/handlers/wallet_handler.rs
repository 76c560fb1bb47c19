//! Wallet Handler
//!
//! Handles wallet creation, deposits, withdrawals and balance reads.
//!
//! Every mutation is a single conditional store operation, so the handler
//! needs no locks of its own and never holds a balance between calls.

use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{Amount, LedgerError, OperationType, Wallet};
use crate::store::{BalanceStore, StoreError, StoreResult};

use super::{BalanceCommand, CreateWalletCommand};

/// Upper bound on a single store call unless configured otherwise
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Handler for wallet operations
#[derive(Debug)]
pub struct WalletHandler<S> {
    store: S,
    operation_timeout: Duration,
}

impl<S: BalanceStore> WalletHandler<S> {
    pub fn new(store: S) -> Self {
        Self::with_timeout(store, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn with_timeout(store: S, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    /// Create a wallet with a zero balance
    pub async fn create_wallet(&self, command: CreateWalletCommand) -> Result<Wallet, LedgerError> {
        // A generated id that collides surfaces as AlreadyExists; no retry.
        let wallet_id = command.wallet_id.unwrap_or_else(Uuid::new_v4);

        match self.bounded(self.store.insert(wallet_id, 0)).await {
            Ok(_) => {
                tracing::info!(wallet_id = %wallet_id, "Wallet created");
                Ok(Wallet::empty(wallet_id))
            }
            Err(StoreError::UniqueViolation) => Err(LedgerError::AlreadyExists(wallet_id)),
            Err(e) => Err(mutation_failed(wallet_id, "create_wallet", e)),
        }
    }

    /// Add `amount` to the wallet balance
    pub async fn deposit(&self, wallet_id: Uuid, amount: i64) -> Result<(), LedgerError> {
        let amount = Amount::new(amount)?;

        let rows_affected = self
            .bounded(self.store.add(wallet_id, amount.value()))
            .await
            .map_err(|e| mutation_failed(wallet_id, "deposit", e))?;

        if rows_affected == 0 {
            return Err(LedgerError::NotFound(wallet_id));
        }

        tracing::debug!(wallet_id = %wallet_id, amount = %amount, "Deposit applied");
        Ok(())
    }

    /// Subtract `amount` from the wallet balance if it is covered
    pub async fn withdraw(&self, wallet_id: Uuid, amount: i64) -> Result<(), LedgerError> {
        let amount = Amount::new(amount)?;

        let rows_affected = self
            .bounded(self.store.subtract_if_sufficient(wallet_id, amount.value()))
            .await
            .map_err(|e| mutation_failed(wallet_id, "withdraw", e))?;

        if rows_affected > 0 {
            tracing::debug!(wallet_id = %wallet_id, amount = %amount, "Withdrawal applied");
            return Ok(());
        }

        // Nothing was debited: either the wallet is missing or the guard
        // failed. Wallets are never deleted, so existence observed here
        // also held when the update ran.
        let exists = self.bounded(self.store.exists(wallet_id)).await?;
        if exists {
            tracing::debug!(wallet_id = %wallet_id, amount = %amount, "Withdrawal rejected: insufficient funds");
            Err(LedgerError::insufficient_funds(wallet_id, amount.value()))
        } else {
            Err(LedgerError::NotFound(wallet_id))
        }
    }

    /// Read the current wallet balance
    pub async fn get_wallet(&self, wallet_id: Uuid) -> Result<Wallet, LedgerError> {
        let balance = self
            .bounded(self.store.read(wallet_id))
            .await?
            .ok_or(LedgerError::NotFound(wallet_id))?;

        Ok(Wallet::new(wallet_id, balance))
    }

    /// Execute a deposit or withdrawal command
    pub async fn execute(&self, command: BalanceCommand) -> Result<(), LedgerError> {
        match command.operation_type {
            OperationType::Deposit => self.deposit(command.wallet_id, command.amount).await,
            OperationType::Withdraw => self.withdraw(command.wallet_id, command.amount).await,
        }
    }

    async fn bounded<T>(&self, call: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        tokio::time::timeout(self.operation_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout)?
    }
}

/// Classify a failed mutating store call
fn mutation_failed(wallet_id: Uuid, operation: &'static str, source: StoreError) -> LedgerError {
    if source.may_have_applied() {
        tracing::warn!(
            wallet_id = %wallet_id,
            operation,
            error = %source,
            "Mutation outcome unknown; not retrying"
        );
        LedgerError::OutcomeUnknown {
            wallet_id,
            operation,
            source,
        }
    } else {
        LedgerError::Store(source)
    }
}
