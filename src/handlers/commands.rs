//! Command definitions
//!
//! Commands represent intentions to change wallet state.

use uuid::Uuid;

use crate::domain::OperationType;

/// Command to create a new wallet
#[derive(Debug, Clone, Default)]
pub struct CreateWalletCommand {
    /// Caller-chosen id; a fresh UUIDv4 is generated when absent
    pub wallet_id: Option<Uuid>,
}

impl CreateWalletCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet_id(mut self, wallet_id: Uuid) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }
}

/// Command to deposit into or withdraw from a wallet
#[derive(Debug, Clone, Copy)]
pub struct BalanceCommand {
    pub wallet_id: Uuid,
    pub operation_type: OperationType,
    /// Amount in the smallest currency unit, validated by the handler
    pub amount: i64,
}

impl BalanceCommand {
    pub fn new(wallet_id: Uuid, operation_type: OperationType, amount: i64) -> Self {
        Self {
            wallet_id,
            operation_type,
            amount,
        }
    }

    pub fn deposit(wallet_id: Uuid, amount: i64) -> Self {
        Self::new(wallet_id, OperationType::Deposit, amount)
    }

    pub fn withdraw(wallet_id: Uuid, amount: i64) -> Self {
        Self::new(wallet_id, OperationType::Withdraw, amount)
    }
}
