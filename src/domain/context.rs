//! Operation Context
//!
//! Per-request metadata used to correlate log lines.

use uuid::Uuid;

/// Context for an operation, used for tracing.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Correlation ID for request tracing
    pub correlation_id: Option<Uuid>,

    /// Value of the `x-request-id` header assigned at the edge
    pub request_id: Option<String>,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            correlation_id: None,
            request_id: None,
        }
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Create context with request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
