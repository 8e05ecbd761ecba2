//! # Entity Registries
//!
//! Thin services over the customer, product and payment method
//! repositories: field validation on the way in, the
//! referential-integrity guard on delete, and the `ServiceError`
//! taxonomy on the way out.

use tracing::info;

use mercado_core::validation;
use mercado_core::{
    Customer, CustomerPatch, NewCustomer, NewPaymentMethod, NewProduct, PaymentMethod,
    PaymentMethodPatch, Product, ProductPatch,
};
use mercado_db::Database;

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Customers
// =============================================================================

/// Service for the customer registry.
#[derive(Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    pub fn new(db: Database) -> Self {
        CustomerService { db }
    }

    /// Lists all customers.
    pub async fn list(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.db.customers().list().await?)
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: i64) -> ServiceResult<Customer> {
        self.db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))
    }

    /// Creates a customer.
    pub async fn create(&self, new: NewCustomer) -> ServiceResult<Customer> {
        validation::validate_name(&new.name)?;

        let customer = self.db.customers().insert(&new).await?;
        info!(id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Applies a partial update to a customer.
    pub async fn update(&self, id: i64, patch: CustomerPatch) -> ServiceResult<Customer> {
        if let Some(name) = &patch.name {
            validation::validate_name(name)?;
        }

        self.db
            .customers()
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))
    }

    /// Deletes a customer.
    ///
    /// Refused with `Conflict` while any sale references the customer.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let repo = self.db.customers();

        if repo.is_referenced_by_sales(id).await? {
            return Err(ServiceError::conflict("Customer", id));
        }

        if !repo.delete(id).await? {
            return Err(ServiceError::not_found("Customer", id));
        }

        info!(id, "Customer deleted");
        Ok(())
    }
}

// =============================================================================
// Products
// =============================================================================

/// Service for the product catalog.
#[derive(Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService { db }
    }

    /// Lists all products.
    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> ServiceResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    /// Creates a product.
    pub async fn create(&self, new: NewProduct) -> ServiceResult<Product> {
        validation::validate_name(&new.name)?;
        validation::validate_price(new.price)?;
        validation::validate_stock(new.quantity)?;

        let product = self.db.products().insert(&new).await?;
        info!(id = product.id, "Product created");
        Ok(product)
    }

    /// Applies a partial update to a product.
    ///
    /// Direct stock edits go through here; the sales workflow adjusts
    /// stock on its own path.
    pub async fn update(&self, id: i64, patch: ProductPatch) -> ServiceResult<Product> {
        if let Some(name) = &patch.name {
            validation::validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validation::validate_price(price)?;
        }
        if let Some(quantity) = patch.quantity {
            validation::validate_stock(quantity)?;
        }

        self.db
            .products()
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Refused with `Conflict` while any sale line item references the
    /// product; historical sales keep their snapshots intact.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let repo = self.db.products();

        if repo.is_referenced_by_sales(id).await? {
            return Err(ServiceError::conflict("Product", id));
        }

        if !repo.delete(id).await? {
            return Err(ServiceError::not_found("Product", id));
        }

        info!(id, "Product deleted");
        Ok(())
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Service for the payment method registry.
#[derive(Clone)]
pub struct PaymentMethodService {
    db: Database,
}

impl PaymentMethodService {
    pub fn new(db: Database) -> Self {
        PaymentMethodService { db }
    }

    /// Lists all payment methods.
    pub async fn list(&self) -> ServiceResult<Vec<PaymentMethod>> {
        Ok(self.db.payment_methods().list().await?)
    }

    /// Gets a payment method by id.
    pub async fn get(&self, id: i64) -> ServiceResult<PaymentMethod> {
        self.db
            .payment_methods()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("PaymentMethod", id))
    }

    /// Creates a payment method.
    pub async fn create(&self, new: NewPaymentMethod) -> ServiceResult<PaymentMethod> {
        validation::validate_name(&new.name)?;
        validation::validate_installments(new.installments)?;

        let method = self.db.payment_methods().insert(&new).await?;
        info!(id = method.id, "Payment method created");
        Ok(method)
    }

    /// Applies a partial update to a payment method.
    pub async fn update(&self, id: i64, patch: PaymentMethodPatch) -> ServiceResult<PaymentMethod> {
        if let Some(name) = &patch.name {
            validation::validate_name(name)?;
        }
        if let Some(installments) = patch.installments {
            validation::validate_installments(installments)?;
        }

        self.db
            .payment_methods()
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("PaymentMethod", id))
    }

    /// Deletes a payment method.
    ///
    /// Refused with `Conflict` while any sale references the method.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let repo = self.db.payment_methods();

        if repo.is_referenced_by_sales(id).await? {
            return Err(ServiceError::conflict("PaymentMethod", id));
        }

        if !repo.delete(id).await? {
            return Err(ServiceError::not_found("PaymentMethod", id));
        }

        info!(id, "Payment method deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::Money;
    use mercado_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: None,
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
        }
    }

    #[tokio::test]
    async fn test_customer_crud() {
        let db = test_db().await;
        let service = CustomerService::new(db);

        let created = service.create(new_customer("Alice")).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap().name, "Alice");

        let updated = service
            .update(
                created.id,
                CustomerPatch {
                    name: Some("Alice B.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice B.");

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = test_db().await;
        let service = CustomerService::new(db);

        let result = service.create(new_customer("   ")).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_product_create_rejects_negative_stock() {
        let db = test_db().await;
        let service = ProductService::new(db);

        let result = service
            .create(NewProduct {
                name: "Widget".to_string(),
                price: Money::from_units(10),
                quantity: -1,
            })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_payment_method_rejects_zero_installments() {
        let db = test_db().await;
        let service = PaymentMethodService::new(db);

        let result = service
            .create(NewPaymentMethod {
                name: "Credit Card".to_string(),
                installments: 0,
            })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        let service = ProductService::new(db);

        assert!(matches!(
            service.delete(999_999).await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
