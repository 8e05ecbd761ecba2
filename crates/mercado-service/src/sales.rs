//! # Sales Workflow Engine
//!
//! The core of the back office: creating and updating sales.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Sale Creation                                 │
//! │                                                                     │
//! │  NewSale { customer_id, payment_method_id, lines[] }                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. Validate lines (non-empty, positive quantities)                 │
//! │  2. Resolve customer, payment method        ── NotFound             │
//! │  3. Resolve products, check stock           ── InsufficientStock    │
//! │  4. total = Σ(current price × quantity)                             │
//! │       │                                                             │
//! │       ▼  BEGIN TRANSACTION                                          │
//! │  5. Insert header (derived total)                                   │
//! │  6. Insert line items (snapshot prices)                             │
//! │  7. Decrement stock, re-checked per row     ── rollback on race     │
//! │       │  COMMIT                                                     │
//! │       ▼                                                             │
//! │  8. Re-read and compose SaleView                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Update replaces the full line set in one transaction and recomputes
//! the total from current prices. It does NOT touch stock: inventory was
//! decremented once at creation and line replacement neither restores
//! nor re-deducts. Reconciling stock on edit needs a per-product delta
//! against the previous line set; until that exists, edits are treated
//! as corrections of what was recorded, not of what left the shelf.

use tracing::{debug, info};

use mercado_core::validation;
use mercado_core::{Money, NewSale, Product, Sale, SaleLine};
use mercado_db::{Database, DbError};

use crate::error::{ServiceError, ServiceResult};
use crate::view::SaleView;

/// Service for the sales workflow.
#[derive(Clone)]
pub struct SalesService {
    db: Database,
}

impl SalesService {
    pub fn new(db: Database) -> Self {
        SalesService { db }
    }

    /// Lists all sales as composed views.
    pub async fn list(&self) -> ServiceResult<Vec<SaleView>> {
        let sales = self.db.sales().list().await?;

        let mut views = Vec::with_capacity(sales.len());
        for sale in sales {
            views.push(self.compose(sale).await?);
        }
        Ok(views)
    }

    /// Gets one sale as a composed view.
    pub async fn get(&self, id: i64) -> ServiceResult<SaleView> {
        let sale = self
            .db
            .sales()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Sale", id))?;

        self.compose(sale).await
    }

    /// Creates a sale.
    ///
    /// Validates all references and stock before any write, then inserts
    /// the header, line items and stock decrements in one transaction.
    /// Any failure inside the transaction rolls back everything.
    pub async fn create(&self, new: NewSale) -> ServiceResult<SaleView> {
        debug!(
            customer_id = new.customer_id,
            lines = new.lines.len(),
            "Creating sale"
        );

        validate_lines(&new.lines)?;
        self.resolve_customer(new.customer_id).await?;
        self.resolve_payment_method(new.payment_method_id).await?;
        let products = self.resolve_products_with_stock(&new.lines).await?;

        let total = compute_total(&new.lines, &products)?;

        let mut tx = self.db.begin().await?;

        let sale = self
            .db
            .sales()
            .insert(&mut tx, new.customer_id, new.payment_method_id, total)
            .await?;

        for (line, product) in new.lines.iter().zip(&products) {
            self.db
                .sales()
                .insert_item(&mut tx, sale.id, line.product_id, line.quantity, product.price)
                .await?;

            // The read-time stock check can be stale by now; the UPDATE
            // re-checks and refuses the overdraw, rolling everything back.
            let decremented = self
                .db
                .products()
                .decrement_stock(&mut tx, line.product_id, line.quantity)
                .await?;
            if !decremented {
                return Err(ServiceError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.quantity,
                });
            }
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(id = sale.id, total = %total, "Sale created");
        self.compose(sale).await
    }

    /// Updates a sale: header fields plus full replacement of the lines.
    ///
    /// The total is recomputed from current product prices, so replaced
    /// lines get fresh snapshots. Stock is not adjusted here.
    pub async fn update(&self, id: i64, new: NewSale) -> ServiceResult<SaleView> {
        debug!(id, lines = new.lines.len(), "Updating sale");

        self.db
            .sales()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Sale", id))?;

        validate_lines(&new.lines)?;
        self.resolve_customer(new.customer_id).await?;
        self.resolve_payment_method(new.payment_method_id).await?;
        let products = self.resolve_products(&new.lines).await?;

        let total = compute_total(&new.lines, &products)?;

        let mut tx = self.db.begin().await?;

        let sale = self
            .db
            .sales()
            .update_header(&mut tx, id, new.customer_id, new.payment_method_id, total)
            .await?
            .ok_or_else(|| ServiceError::not_found("Sale", id))?;

        self.db.sales().delete_items_by_sale(&mut tx, id).await?;

        for (line, product) in new.lines.iter().zip(&products) {
            self.db
                .sales()
                .insert_item(&mut tx, id, line.product_id, line.quantity, product.price)
                .await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(id, total = %total, "Sale updated");
        self.compose(sale).await
    }

    /// Deletes a sale; its line items cascade.
    ///
    /// Stock is not restored (decrement-once policy, same as update).
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.db.sales().delete(id).await? {
            return Err(ServiceError::not_found("Sale", id));
        }

        info!(id, "Sale deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reference resolution
    // -------------------------------------------------------------------------

    async fn resolve_customer(&self, id: i64) -> ServiceResult<()> {
        self.db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))?;
        Ok(())
    }

    async fn resolve_payment_method(&self, id: i64) -> ServiceResult<()> {
        self.db
            .payment_methods()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("PaymentMethod", id))?;
        Ok(())
    }

    /// Resolves every line's product, in line order.
    async fn resolve_products(&self, lines: &[SaleLine]) -> ServiceResult<Vec<Product>> {
        let repo = self.db.products();

        let mut products = Vec::with_capacity(lines.len());
        for line in lines {
            let product = repo
                .get_by_id(line.product_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Product", line.product_id))?;
            products.push(product);
        }
        Ok(products)
    }

    /// Resolves products and checks stock sufficiency per line, before
    /// any mutation.
    async fn resolve_products_with_stock(&self, lines: &[SaleLine]) -> ServiceResult<Vec<Product>> {
        let products = self.resolve_products(lines).await?;

        for (line, product) in lines.iter().zip(&products) {
            if !product.has_stock(line.quantity) {
                return Err(ServiceError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.quantity,
                });
            }
        }
        Ok(products)
    }

    // -------------------------------------------------------------------------
    // Read composition
    // -------------------------------------------------------------------------

    /// Joins a sale header with its references and line items.
    async fn compose(&self, sale: Sale) -> ServiceResult<SaleView> {
        let customer = self.db.customers().get_by_id(sale.customer_id).await?;
        let payment_method = self
            .db
            .payment_methods()
            .get_by_id(sale.payment_method_id)
            .await?;

        let items = self.db.sales().items_by_sale(sale.id).await?;

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let product = self.db.products().get_by_id(item.product_id).await?;
            resolved.push((item, product));
        }

        Ok(SaleView::compose(sale, customer, payment_method, resolved))
    }
}

/// Derives the sale total: Σ(current price × requested quantity).
///
/// Checked arithmetic throughout; a total that leaves the representable
/// money range is invalid input, not a panic.
fn compute_total(lines: &[SaleLine], products: &[Product]) -> ServiceResult<Money> {
    let mut total = Money::zero();
    for (line, product) in lines.iter().zip(products) {
        let line_total = product
            .price
            .multiply_quantity(line.quantity)
            .ok_or_else(|| ServiceError::invalid_input("sale total out of range"))?;
        total = total
            .checked_add(line_total)
            .ok_or_else(|| ServiceError::invalid_input("sale total out of range"))?;
    }
    Ok(total)
}

/// Validates the requested lines before anything is resolved or written.
fn validate_lines(lines: &[SaleLine]) -> ServiceResult<()> {
    if lines.is_empty() {
        return Err(mercado_core::ValidationError::Empty { field: "lines" }.into());
    }

    for line in lines {
        validation::validate_line_quantity(line.quantity)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
