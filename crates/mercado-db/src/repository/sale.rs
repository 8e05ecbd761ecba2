//! # Sale Repository
//!
//! Database operations for sale headers and their line items.
//!
//! Write methods take a `&mut SqliteConnection` so the service layer can
//! group them with the stock decrement in one transaction. Reads go
//! through the pool.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use mercado_core::{Money, Sale, SaleLineItem};

use crate::error::DbResult;

/// Repository for sale database operations.
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new sale repository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sale headers, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, payment_method_id, total_price,
                   created_at, updated_at
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Gets a sale header by id. Returns None if not found.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, payment_method_id, total_price,
                   created_at, updated_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Inserts a sale header inside a caller-owned transaction.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        customer_id: i64,
        payment_method_id: i64,
        total_price: Money,
    ) -> DbResult<Sale> {
        let now = Utc::now();

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (customer_id, payment_method_id, total_price,
                               created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, customer_id, payment_method_id, total_price,
                      created_at, updated_at
            "#,
        )
        .bind(customer_id)
        .bind(payment_method_id)
        .bind(total_price)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        debug!(id = sale.id, "Inserted sale");
        Ok(sale)
    }

    /// Rewrites a sale header inside a caller-owned transaction.
    ///
    /// Returns the updated header, or None if the id does not exist.
    pub async fn update_header(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        customer_id: i64,
        payment_method_id: i64,
        total_price: Money,
    ) -> DbResult<Option<Sale>> {
        let now = Utc::now();

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                customer_id = ?2,
                payment_method_id = ?3,
                total_price = ?4,
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, customer_id, payment_method_id, total_price,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(payment_method_id)
        .bind(total_price)
        .bind(now)
        .fetch_optional(&mut *conn)
        .await?;

        if sale.is_some() {
            debug!(id, "Updated sale header");
        }
        Ok(sale)
    }

    /// Deletes a sale. Line items go with it via ON DELETE CASCADE.
    ///
    /// Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(id, "Deleted sale");
        }
        Ok(deleted)
    }

    /// Lists the line items of a sale, ordered by id.
    pub async fn items_by_sale(&self, sale_id: i64) -> DbResult<Vec<SaleLineItem>> {
        let items = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a line item inside a caller-owned transaction.
    ///
    /// `unit_price` is the price snapshot taken at sale time; later
    /// catalog price changes never touch it.
    pub async fn insert_item(
        &self,
        conn: &mut SqliteConnection,
        sale_id: i64,
        product_id: i64,
        quantity: i64,
        unit_price: Money,
    ) -> DbResult<SaleLineItem> {
        let now = Utc::now();

        let item = sqlx::query_as::<_, SaleLineItem>(
            r#"
            INSERT INTO sale_items (sale_id, product_id, quantity, unit_price, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, sale_id, product_id, quantity, unit_price, created_at
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        Ok(item)
    }

    /// Deletes all line items of a sale inside a caller-owned transaction.
    ///
    /// The update workflow replaces the full line set; stale items must go
    /// before the new ones land.
    pub async fn delete_items_by_sale(
        &self,
        conn: &mut SqliteConnection,
        sale_id: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use mercado_core::{Money, NewCustomer, NewPaymentMethod, NewProduct};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Seeds a customer, product and payment method; returns their ids.
    async fn seed_references(db: &Database) -> (i64, i64, i64) {
        let customer = db
            .customers()
            .insert(&NewCustomer {
                name: "Alice".to_string(),
                email: None,
                postal_code: None,
                street: None,
                number: None,
                complement: None,
                neighborhood: None,
                city: None,
                state: None,
            })
            .await
            .unwrap();

        let product = db
            .products()
            .insert(&NewProduct {
                name: "Widget".to_string(),
                price: Money::from_units(10),
                quantity: 100,
            })
            .await
            .unwrap();

        let method = db
            .payment_methods()
            .insert(&NewPaymentMethod {
                name: "Cash".to_string(),
                installments: 1,
            })
            .await
            .unwrap();

        (customer.id, product.id, method.id)
    }

    #[tokio::test]
    async fn test_insert_header_and_items() {
        let db = test_db().await;
        let (customer_id, product_id, method_id) = seed_references(&db).await;
        let repo = db.sales();

        let mut tx = db.begin().await.unwrap();
        let sale = repo
            .insert(&mut tx, customer_id, method_id, Money::from_units(30))
            .await
            .unwrap();
        repo.insert_item(&mut tx, sale.id, product_id, 3, Money::from_units(10))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let items = repo.items_by_sale(sale.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].unit_price, Money::from_units(10));
    }

    #[tokio::test]
    async fn test_uncommitted_transaction_rolls_back() {
        let db = test_db().await;
        let (customer_id, _, method_id) = seed_references(&db).await;
        let repo = db.sales();

        let mut tx = db.begin().await.unwrap();
        repo.insert(&mut tx, customer_id, method_id, Money::from_units(30))
            .await
            .unwrap();
        drop(tx);

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_items() {
        let db = test_db().await;
        let (customer_id, product_id, method_id) = seed_references(&db).await;
        let repo = db.sales();

        let mut tx = db.begin().await.unwrap();
        let sale = repo
            .insert(&mut tx, customer_id, method_id, Money::from_units(10))
            .await
            .unwrap();
        repo.insert_item(&mut tx, sale.id, product_id, 1, Money::from_units(10))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert!(repo.delete(sale.id).await.unwrap());
        assert!(repo.items_by_sale(sale.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_key_enforced_on_header() {
        let db = test_db().await;
        let repo = db.sales();

        let mut tx = db.begin().await.unwrap();
        let result = repo
            .insert(&mut tx, 999_999, 999_999, Money::from_units(10))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_price_survives_catalog_change() {
        let db = test_db().await;
        let (customer_id, product_id, method_id) = seed_references(&db).await;
        let repo = db.sales();

        let mut tx = db.begin().await.unwrap();
        let sale = repo
            .insert(&mut tx, customer_id, method_id, Money::from_units(10))
            .await
            .unwrap();
        repo.insert_item(&mut tx, sale.id, product_id, 1, Money::from_units(10))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        // Catalog price moves after the sale
        db.products()
            .update(
                product_id,
                &mercado_core::ProductPatch {
                    price: Some(Money::from_units(99)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let items = repo.items_by_sale(sale.id).await.unwrap();
        assert_eq!(items[0].unit_price, Money::from_units(10));
    }
}
