//! Wallet entity
//!
//! A wallet is an identifier paired with a non-negative integer balance.
//! Instances are snapshots returned by the ledger; the authoritative balance
//! always lives in the balance store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Snapshot of a wallet as read from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(rename = "walletId")]
    pub id: Uuid,
    pub balance: i64,
}

impl Wallet {
    pub fn new(id: Uuid, balance: i64) -> Self {
        Self { id, balance }
    }

    /// A freshly created wallet
    pub fn empty(id: Uuid) -> Self {
        Self::new(id, 0)
    }
}

/// Balance mutation requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "deposit",
            OperationType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
