//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Order status transition is not allowed
    #[error("Cannot {operation} an order in status {status}")]
    InvalidTransition { operation: String, status: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(operation: impl Into<String>, status: impl Into<String>) -> Self {
        Self::InvalidTransition {
            operation: operation.into(),
            status: status.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Order", "123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Order");
                assert_eq!(id, "123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_display() {
        let err = DomainError::not_found("Order", "abc");
        assert_eq!(err.to_string(), "Order not found: abc");
    }

    #[test]
    fn invalid_transition_display() {
        let err = DomainError::invalid_transition("ship", "placed");
        assert_eq!(err.to_string(), "Cannot ship an order in status placed");
    }

    #[test]
    fn validation_error_display() {
        let err = DomainError::ValidationError("quantity must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: quantity must be positive"
        );
    }
}
