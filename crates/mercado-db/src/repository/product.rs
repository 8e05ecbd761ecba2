//! # Product Repository
//!
//! Database operations for the product catalog, including the conditional
//! stock decrement used by the sales workflow.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use mercado_core::{NewProduct, Product, ProductPatch};

use crate::error::DbResult;

/// Repository for product database operations.
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new product repository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by id. Returns None if not found.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the stored row.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, price, quantity, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.quantity)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = product.id, "Inserted product");
        Ok(product)
    }

    /// Applies a partial update to a product.
    ///
    /// Returns None if the id does not exist.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Option<Product>> {
        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                price = COALESCE(?3, price),
                quantity = COALESCE(?4, quantity),
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, name, price, quantity, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.price)
        .bind(patch.quantity)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if product.is_some() {
            debug!(id, "Updated product");
        }
        Ok(product)
    }

    /// Deletes a product. Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(id, "Deleted product");
        }
        Ok(deleted)
    }

    /// Checks whether any sale line item references this product.
    pub async fn is_referenced_by_sales(&self, id: i64) -> DbResult<bool> {
        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sale_items WHERE product_id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(referenced)
    }

    /// Conditionally decrements stock inside a caller-owned transaction.
    ///
    /// The WHERE clause re-checks availability at write time, so two
    /// concurrent sales cannot both take the last unit. Returns false
    /// when stock was insufficient (or the product vanished); the caller
    /// must then roll back.
    pub async fn decrement_stock(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        quantity: i64,
    ) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2, updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let decremented = result.rows_affected() > 0;
        debug!(id, quantity, decremented, "Stock decrement attempted");
        Ok(decremented)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use mercado_core::{Money, NewProduct, ProductPatch};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn widget(quantity: i64) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: Money::from_units(10),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&widget(5)).await.unwrap();
        assert_eq!(created.price, Money::from_units(10));
        assert_eq!(created.quantity, 5);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&widget(5)).await.unwrap();

        let patch = ProductPatch {
            price: Some(Money::from_units(12)),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.price, Money::from_units(12));
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.quantity, 5);
    }

    #[tokio::test]
    async fn test_decrement_stock_succeeds_when_available() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&widget(5)).await.unwrap();

        let mut tx = db.begin().await.unwrap();
        let ok = repo.decrement_stock(&mut tx, created.id, 3).await.unwrap();
        tx.commit().await.unwrap();

        assert!(ok);
        let after = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 2);
    }

    #[tokio::test]
    async fn test_decrement_stock_refuses_overdraw() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&widget(2)).await.unwrap();

        let mut tx = db.begin().await.unwrap();
        let ok = repo.decrement_stock(&mut tx, created.id, 3).await.unwrap();
        drop(tx); // roll back

        assert!(!ok);
        let after = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 2);
    }

    #[tokio::test]
    async fn test_decrement_stock_to_exactly_zero() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&widget(3)).await.unwrap();

        let mut tx = db.begin().await.unwrap();
        let ok = repo.decrement_stock(&mut tx, created.id, 3).await.unwrap();
        tx.commit().await.unwrap();

        assert!(ok);
        let after = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 0);
    }
}
