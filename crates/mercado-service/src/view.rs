//! # Sale Read Model
//!
//! Denormalized view of a sale for consumers: the header joined with its
//! customer, payment method and line items, each line carrying the product
//! as it reads NOW next to the price snapshot taken at sale time.
//!
//! The persistence model ([`mercado_core::Sale`]) and this read model are
//! distinct types; the composer builds a view per request, nothing is
//! cached or stored denormalized.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mercado_core::{Customer, Money, PaymentMethod, Product, Sale, SaleLineItem};

/// Composed sale as served to consumers.
///
/// `customer` and `payment_method` hold zero or one element. Under the
/// referential-integrity invariants they are always populated; an empty
/// vec means the reference stopped resolving and the consumer should
/// render the sale without it rather than fail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: i64,
    pub customer: Vec<Customer>,
    pub payment_method: Vec<PaymentMethod>,
    pub total_price: Money,
    pub items: Vec<LineItemView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sale line joined with its product's current state.
///
/// `unit_price` is the historical snapshot; `product` (when resolvable)
/// carries the catalog's current price and stock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub id: i64,
    pub product: Vec<Product>,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleView {
    /// Assembles a view from its already-resolved parts.
    pub fn compose(
        sale: Sale,
        customer: Option<Customer>,
        payment_method: Option<PaymentMethod>,
        items: Vec<(SaleLineItem, Option<Product>)>,
    ) -> Self {
        SaleView {
            id: sale.id,
            customer: customer.into_iter().collect(),
            payment_method: payment_method.into_iter().collect(),
            total_price: sale.total_price,
            items: items
                .into_iter()
                .map(|(item, product)| LineItemView {
                    id: item.id,
                    product: product.into_iter().collect(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            created_at: sale.created_at,
            updated_at: sale.updated_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sale() -> Sale {
        let now = Utc::now();
        Sale {
            id: 1,
            customer_id: 10,
            payment_method_id: 20,
            total_price: Money::from_units(30),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_references_become_empty_vecs() {
        let view = SaleView::compose(sample_sale(), None, None, vec![]);

        assert!(view.customer.is_empty());
        assert!(view.payment_method.is_empty());
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let view = SaleView::compose(sample_sale(), None, None, vec![]);
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("totalPrice").is_some());
        assert!(json.get("paymentMethod").is_some());
        assert!(json.get("total_price").is_none());
    }
}
