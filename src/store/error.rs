//! Balance Store Errors
//!
//! Error types for balance store operations.

use uuid::Uuid;

/// Errors that can occur in a balance store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert collided with an existing wallet id
    #[error("Unique constraint violation")]
    UniqueViolation,

    /// Applying the delta would overflow the balance column
    #[error("Balance overflow for wallet {0}")]
    Overflow(Uuid),

    /// Store call did not complete within the operation timeout
    #[error("Store operation timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Check if retrying the same call could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Timeout => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed
            ),
            StoreError::UniqueViolation | StoreError::Overflow(_) => false,
        }
    }

    /// Check if a mutating statement may have been applied despite the error.
    ///
    /// Errors raised by the database itself mean the statement was rejected
    /// and rolled back. Transport failures after the statement was sent do not
    /// tell us either way.
    pub fn may_have_applied(&self) -> bool {
        match self {
            StoreError::Timeout => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::Io(_) | sqlx::Error::Protocol(_) | sqlx::Error::WorkerCrashed
            ),
            StoreError::UniqueViolation | StoreError::Overflow(_) => false,
        }
    }
}

/// Result type for balance store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transient_and_ambiguous() {
        let err = StoreError::Timeout;
        assert!(err.is_transient());
        assert!(err.may_have_applied());
    }

    #[test]
    fn test_pool_timeout_never_reached_the_database() {
        let err = StoreError::Database(sqlx::Error::PoolTimedOut);
        assert!(err.is_transient());
        assert!(!err.may_have_applied());
    }

    #[test]
    fn test_io_error_is_ambiguous() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = StoreError::Database(sqlx::Error::Io(io));
        assert!(err.may_have_applied());
    }

    #[test]
    fn test_constraint_errors_are_final() {
        assert!(!StoreError::UniqueViolation.is_transient());
        assert!(!StoreError::UniqueViolation.may_have_applied());
        assert!(!StoreError::Overflow(Uuid::new_v4()).may_have_applied());
    }
}
