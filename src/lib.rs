//! wallet_ledger Library
//!
//! Wallet ledger core with race-free deposits and withdrawals.
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod handlers;
pub mod store;

pub use config::Config;
pub use domain::{Amount, ErrorKind, LedgerError, OperationContext, OperationType, Wallet};
pub use error::AppError;
pub use handlers::WalletHandler;
pub use store::{BalanceStore, InMemoryBalanceStore, PgBalanceStore, StoreError};
