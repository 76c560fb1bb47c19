//! Ledger Error Types
//!
//! Outcomes of ledger operations other than success. Callers compare errors
//! by [`ErrorKind`], never by message text.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Stable classification of ledger failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    NotFound,
    AlreadyExists,
    InsufficientFunds,
    Store,
}

impl ErrorKind {
    /// Machine-readable code exposed to API clients
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::NotFound => "wallet_not_found",
            ErrorKind::AlreadyExists => "wallet_already_exists",
            ErrorKind::InsufficientFunds => "insufficient_funds",
            ErrorKind::Store => "internal_error",
        }
    }
}

/// Errors returned by the ledger core.
///
/// Business-rule variants are terminal for the request. Only store failures
/// may be retried, and only when [`LedgerError::is_retryable`] says the
/// mutation is known not to have applied.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount is zero or negative
    #[error("Amount must be positive (got {0})")]
    InvalidAmount(i64),

    /// Referenced wallet does not exist
    #[error("Wallet not found: {0}")]
    NotFound(Uuid),

    /// Wallet id collision on creation
    #[error("Wallet already exists: {0}")]
    AlreadyExists(Uuid),

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds in wallet {wallet_id}: requested {requested}")]
    InsufficientFunds { wallet_id: Uuid, requested: i64 },

    /// Store failure that is known not to have mutated state
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Mutation was interrupted after it may have reached the store
    #[error("Outcome of {operation} on wallet {wallet_id} is unknown: {source}")]
    OutcomeUnknown {
        wallet_id: Uuid,
        operation: &'static str,
        source: StoreError,
    },
}

impl LedgerError {
    pub fn insufficient_funds(wallet_id: Uuid, requested: i64) -> Self {
        Self::InsufficientFunds {
            wallet_id,
            requested,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Store(_) | Self::OutcomeUnknown { .. } => ErrorKind::Store,
        }
    }

    /// Check if this is a client error (caller's fault or business rule)
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Store)
    }

    /// Check if the caller may safely retry the same operation
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Check if a mutation may or may not have been applied
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(self, Self::OutcomeUnknown { .. })
    }
}
