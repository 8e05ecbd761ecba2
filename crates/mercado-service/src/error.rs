//! # Service Error Type
//!
//! Unified error taxonomy for the workflow layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in the Back Office                      │
//! │                                                                     │
//! │  ValidationError (mercado-core)  ──►  InvalidInput                  │
//! │                                                                     │
//! │  DbError (mercado-db)                                               │
//! │    NotFound            ──────────►  NotFound                        │
//! │    everything else     ──────────►  Persistence                     │
//! │                                                                     │
//! │  Workflow decisions (this crate)                                    │
//! │    reference missing   ──────────►  NotFound                        │
//! │    guarded delete      ──────────►  Conflict                        │
//! │    stock too low       ──────────►  InsufficientStock               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! A transport layer sitting on top of this crate maps variants to HTTP
//! status codes: `NotFound` → 404, `Conflict` → 409, `InvalidInput` → 400,
//! `InsufficientStock` → 409, `Persistence` → 500.

use thiserror::Error;

use mercado_core::ValidationError;
use mercado_db::DbError;

/// Errors returned by the workflow and registry services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Deletion refused because other records still reference the entity.
    #[error("{entity} {id} is referenced by existing sales")]
    Conflict { entity: &'static str, id: i64 },

    /// Input failed validation before any mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested quantity exceeds what is on hand.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    /// Database failure. Fatal for the current request; never retried.
    #[error("persistence error: {0}")]
    Persistence(#[from] DbError),
}

impl ServiceError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    /// Creates a Conflict error for a guarded delete.
    pub fn conflict(entity: &'static str, id: i64) -> Self {
        ServiceError::Conflict { entity, id }
    }

    /// Creates an InvalidInput error from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_becomes_invalid_input() {
        let err: ServiceError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn test_db_error_becomes_persistence() {
        let err: ServiceError = DbError::PoolExhausted.into();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = ServiceError::not_found("Customer", 42);
        assert_eq!(err.to_string(), "Customer not found: 42");

        let err = ServiceError::InsufficientStock {
            product_id: 7,
            requested: 5,
            available: 2,
        };
        assert!(err.to_string().contains("requested 5"));
        assert!(err.to_string().contains("available 2"));
    }
}
