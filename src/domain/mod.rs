//! Domain module
//!
//! Core domain types and business rules.

pub mod amount;
pub mod context;
pub mod error;
pub mod wallet;

pub use amount::Amount;
pub use context::OperationContext;
pub use error::{ErrorKind, LedgerError};
pub use wallet::{OperationType, Wallet};
