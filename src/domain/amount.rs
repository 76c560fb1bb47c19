//! Amount type
//!
//! Domain primitive for monetary amounts in the smallest currency unit.
//! Amounts are validated at construction time, so a non-positive amount
//! can never reach the balance store.

use std::fmt;

use super::error::LedgerError;

/// Amount represents a validated, strictly positive monetary value.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - Value is an integer count of the smallest currency unit
///
/// # Example
/// ```
/// use wallet_ledger::domain::Amount;
///
/// let amount = Amount::new(100).unwrap();
/// assert_eq!(amount.value(), 100);
/// assert!(Amount::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `LedgerError::InvalidAmount` if value <= 0
    pub fn new(value: i64) -> Result<Self, LedgerError> {
        if value <= 0 {
            return Err(LedgerError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
