//! # Validation Error Types
//!
//! Typed input-validation failures for mercado-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  mercado-core (this file)                                           │
//! │  └── ValidationError  - input validation failures                   │
//! │                                                                     │
//! │  mercado-db                                                         │
//! │  └── DbError          - database operation failures                 │
//! │                                                                     │
//! │  mercado-service                                                    │
//! │  └── ServiceError     - workflow-level taxonomy the transport       │
//! │                         layer maps to status codes                  │
//! │                                                                     │
//! │  Flow: ValidationError ─┐                                           │
//! │                         ├──► ServiceError ──► status code           │
//! │        DbError ─────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Raised before business logic runs; the transport layer maps these to
/// 400 Bad Request.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid format (e.g. a non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// A collection that must not be empty is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: &'static str },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
