//! # Customer Repository
//!
//! Database operations for the customer registry.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use mercado_core::{Customer, CustomerPatch, NewCustomer};

use crate::error::DbResult;

/// Repository for customer database operations.
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, postal_code, street, number, complement,
                   neighborhood, city, state, created_at, updated_at
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Gets a customer by id. Returns None if not found.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, postal_code, street, number, complement,
                   neighborhood, city, state, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer and returns the stored row.
    pub async fn insert(&self, new: &NewCustomer) -> DbResult<Customer> {
        let now = Utc::now();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers
                (name, email, postal_code, street, number, complement,
                 neighborhood, city, state, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING id, name, email, postal_code, street, number, complement,
                      neighborhood, city, state, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.postal_code)
        .bind(&new.street)
        .bind(&new.number)
        .bind(&new.complement)
        .bind(&new.neighborhood)
        .bind(&new.city)
        .bind(&new.state)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = customer.id, "Inserted customer");
        Ok(customer)
    }

    /// Applies a partial update to a customer.
    ///
    /// Absent fields keep their stored value; this path cannot clear a
    /// field back to NULL. Returns None if the id does not exist.
    pub async fn update(&self, id: i64, patch: &CustomerPatch) -> DbResult<Option<Customer>> {
        let now = Utc::now();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                name = COALESCE(?2, name),
                email = COALESCE(?3, email),
                postal_code = COALESCE(?4, postal_code),
                street = COALESCE(?5, street),
                number = COALESCE(?6, number),
                complement = COALESCE(?7, complement),
                neighborhood = COALESCE(?8, neighborhood),
                city = COALESCE(?9, city),
                state = COALESCE(?10, state),
                updated_at = ?11
            WHERE id = ?1
            RETURNING id, name, email, postal_code, street, number, complement,
                      neighborhood, city, state, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.postal_code)
        .bind(&patch.street)
        .bind(&patch.number)
        .bind(&patch.complement)
        .bind(&patch.neighborhood)
        .bind(&patch.city)
        .bind(&patch.state)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if customer.is_some() {
            debug!(id, "Updated customer");
        }
        Ok(customer)
    }

    /// Deletes a customer. Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(id, "Deleted customer");
        }
        Ok(deleted)
    }

    /// Checks whether any sale references this customer.
    ///
    /// The service layer refuses deletion while this returns true.
    pub async fn is_referenced_by_sales(&self, id: i64) -> DbResult<bool> {
        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sales WHERE customer_id = ?1)")
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
    use mercado_core::{CustomerPatch, NewCustomer};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: Some("Springfield".to_string()),
            state: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.customers();

        let created = repo.insert(&sample_customer("Alice")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Alice");

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;

        let missing = db.customers().get_by_id(999_999).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&sample_customer("Alice")).await.unwrap();
        repo.insert(&sample_customer("Bob")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_absent_fields() {
        let db = test_db().await;
        let repo = db.customers();

        let created = repo.insert(&sample_customer("Alice")).await.unwrap();

        let patch = CustomerPatch {
            name: Some("Alice B.".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "Alice B.");
        // Untouched fields survive the patch
        assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
        assert_eq!(updated.city.as_deref(), Some("Springfield"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = test_db().await;

        let patch = CustomerPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        let result = db.customers().update(999_999, &patch).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.customers();

        let created = repo.insert(&sample_customer("Alice")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        // Second delete finds nothing
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
