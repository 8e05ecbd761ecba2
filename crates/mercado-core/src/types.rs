//! # Domain Types
//!
//! Core domain types for the Mercado back office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────┐             │
//! │  │   Customer   │  │   Product    │  │ PaymentMethod │             │
//! │  │ ──────────── │  │ ──────────── │  │ ───────────── │             │
//! │  │ id           │  │ id           │  │ id            │             │
//! │  │ name         │  │ name         │  │ name          │             │
//! │  │ address…     │  │ price        │  │ installments  │             │
//! │  │ email        │  │ quantity     │  │               │             │
//! │  └──────┬───────┘  └──────┬───────┘  └───────┬───────┘             │
//! │         │                 │                  │                      │
//! │         └────────┐   ┌────┘    ┌─────────────┘                      │
//! │                  ▼   ▼         ▼                                    │
//! │              ┌──────────────────────┐                               │
//! │              │         Sale         │  header: derived total,      │
//! │              │  └── SaleLineItem[]  │  snapshot unit prices        │
//! │              └──────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity id is an `i64` assigned by the store on insert. The
//! `New*` structs are creation payloads (no id, no timestamps); the
//! `*Patch` structs are partial updates where `None` means "leave as is".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
///
/// Only the name is required; the postal address fields and email are
/// optional and independently patchable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Partial update for a customer. `None` fields are left untouched
/// (fields cannot be cleared back to NULL through a patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `quantity` is the stock level. It is mutated by direct edits and,
/// implicitly, by sale creation (stock decrement).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Current unit price (non-negative). Sales snapshot this value into
    /// their line items; later edits never rewrite history.
    pub price: Money,
    /// Quantity on hand (non-negative).
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the requested quantity can be fulfilled from stock.
    #[inline]
    pub fn has_stock(&self, requested: i64) -> bool {
        self.quantity >= requested
    }
}

/// Creation payload for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

/// Partial update for a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// A payment method (e.g. "credit card in 3 installments").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    /// Number of installments (positive).
    pub installments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a payment method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    pub name: String,
    pub installments: i64,
}

/// Partial update for a payment method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub installments: Option<i64>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale header: the parent record of a sale, excluding its line items.
///
/// `total_price` is derived: always Σ(line unit_price × quantity) at the
/// time of the last write. It is never recomputed lazily on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub customer_id: i64,
    pub payment_method_id: i64,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One product-quantity-price entry belonging to exactly one sale.
///
/// `unit_price` is the snapshot captured at sale time. It is decoupled
/// from the product's current price so historical sales stay accurate
/// when product prices change later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub created_at: DateTime<Utc>,
}

/// Creation/replacement payload for a sale: the two references plus the
/// ordered list of requested lines. Used by both create (new sale) and
/// update (full replacement of the line list).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub customer_id: i64,
    pub payment_method_id: i64,
    pub lines: Vec<SaleLine>,
}

/// One requested line: which product, how many.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Widget".to_string(),
            price: Money::from_units(10),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_has_stock() {
        assert!(product(5).has_stock(3));
        assert!(product(5).has_stock(5));
        assert!(!product(5).has_stock(6));
        assert!(!product(0).has_stock(1));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let now = Utc::now();
        let sale = Sale {
            id: 1,
            customer_id: 2,
            payment_method_id: 3,
            total_price: Money::from_units(30),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["customerId"], 2);
        assert_eq!(json["paymentMethodId"], 3);
        assert_eq!(json["totalPrice"], 300_000);
    }

    #[test]
    fn test_patch_defaults_to_no_changes() {
        let patch: CustomerPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());
    }

    #[test]
    fn test_new_sale_deserializes_from_wire() {
        let payload = r#"{
            "customerId": 1,
            "paymentMethodId": 2,
            "lines": [{ "productId": 10, "quantity": 2 }]
        }"#;

        let sale: NewSale = serde_json::from_str(payload).unwrap();
        assert_eq!(sale.customer_id, 1);
        assert_eq!(sale.payment_method_id, 2);
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.lines[0].product_id, 10);
        assert_eq!(sale.lines[0].quantity, 2);
    }
}
