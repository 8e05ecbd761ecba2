//! # Payment Method Repository
//!
//! Database operations for the payment method registry.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use mercado_core::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch};

use crate::error::DbResult;

/// Repository for payment method database operations.
pub struct PaymentMethodRepository {
    pool: SqlitePool,
}

impl PaymentMethodRepository {
    /// Creates a new payment method repository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentMethodRepository { pool }
    }

    /// Lists all payment methods, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<PaymentMethod>> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, name, installments, created_at, updated_at
            FROM payment_methods
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = methods.len(), "Listed payment methods");
        Ok(methods)
    }

    /// Gets a payment method by id. Returns None if not found.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<PaymentMethod>> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, name, installments, created_at, updated_at
            FROM payment_methods
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(method)
    }

    /// Inserts a new payment method and returns the stored row.
    pub async fn insert(&self, new: &NewPaymentMethod) -> DbResult<PaymentMethod> {
        let now = Utc::now();

        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            INSERT INTO payment_methods (name, installments, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, installments, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.installments)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = method.id, "Inserted payment method");
        Ok(method)
    }

    /// Applies a partial update to a payment method.
    ///
    /// Returns None if the id does not exist.
    pub async fn update(
        &self,
        id: i64,
        patch: &PaymentMethodPatch,
    ) -> DbResult<Option<PaymentMethod>> {
        let now = Utc::now();

        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            UPDATE payment_methods SET
                name = COALESCE(?2, name),
                installments = COALESCE(?3, installments),
                updated_at = ?4
            WHERE id = ?1
            RETURNING id, name, installments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.installments)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if method.is_some() {
            debug!(id, "Updated payment method");
        }
        Ok(method)
    }

    /// Deletes a payment method. Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(id, "Deleted payment method");
        }
        Ok(deleted)
    }

    /// Checks whether any sale references this payment method.
    pub async fn is_referenced_by_sales(&self, id: i64) -> DbResult<bool> {
        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sales WHERE payment_method_id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(referenced)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use mercado_core::{NewPaymentMethod, PaymentMethodPatch};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.payment_methods();

        let created = repo
            .insert(&NewPaymentMethod {
                name: "Credit Card".to_string(),
                installments: 12,
            })
            .await
            .unwrap();

        assert_eq!(created.installments, 12);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Credit Card");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = test_db().await;
        let repo = db.payment_methods();

        let created = repo
            .insert(&NewPaymentMethod {
                name: "Cash".to_string(),
                installments: 1,
            })
            .await
            .unwrap();

        let patch = PaymentMethodPatch {
            name: Some("Cash on Delivery".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "Cash on Delivery");
        assert_eq!(updated.installments, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let db = test_db().await;

        assert!(!db.payment_methods().delete(999_999).await.unwrap());
    }
}
