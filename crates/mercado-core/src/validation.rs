//! # Validation Module
//!
//! Input validation for the back-office registries and the sales workflow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Transport (external)                                      │
//! │  ├── JSON parsing, missing body, malformed payload                  │
//! │  └── maps to 400 before the service is called                       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  └── field-level business rules (required, ranges, positivity)      │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL, CHECK and foreign-key constraints                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LEN};

/// Validates an entity name (customer, product, payment method).
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative { field: "price" });
    }

    Ok(())
}

/// Validates a product stock level.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (out of stock)
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative { field: "quantity" });
    }

    Ok(())
}

/// Validates a requested sale line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a payment method's installment count.
///
/// ## Rules
/// - Must be positive (at least one installment)
pub fn validate_installments(installments: i64) -> ValidationResult<()> {
    if installments <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "installments",
        });
    }

    Ok(())
}

/// Parses an id received as text (e.g. a path or query parameter).
///
/// The transport layer passes ids through as strings; anything
/// non-numeric or non-positive is rejected here as invalid input rather
/// than surfacing as a spurious not-found.
///
/// ## Example
/// ```rust
/// use mercado_core::validation::parse_id;
///
/// assert_eq!(parse_id("42").unwrap(), 42);
/// assert!(parse_id("abc").is_err());
/// assert!(parse_id("0").is_err());
/// ```
pub fn parse_id(raw: &str) -> ValidationResult<i64> {
    let id: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "must be a numeric id",
    })?;

    if id <= 0 {
        return Err(ValidationError::MustBePositive { field: "id" });
    }

    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Widget").is_ok());
        assert!(validate_name("  Widget  ").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_units(10)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_scaled(-1)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_line_quantity() {
        assert!(validate_line_quantity(1).is_ok());
        assert!(validate_line_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_line_quantity(0).is_err());
        assert!(validate_line_quantity(-3).is_err());
        assert!(validate_line_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_installments() {
        assert!(validate_installments(1).is_ok());
        assert!(validate_installments(12).is_ok());
        assert!(validate_installments(0).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);

        assert!(parse_id("").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
    }
}
