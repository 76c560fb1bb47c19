//! Command Handlers module
//!
//! The ledger core: validates commands, issues conditional balance store
//! operations and interprets their outcomes.

mod commands;
mod wallet_handler;


pub use commands::*;
pub use wallet_handler::{WalletHandler, DEFAULT_OPERATION_TIMEOUT};
