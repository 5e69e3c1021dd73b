//! Inventory service - product catalogue use cases.
//!
//! Validates write models before they reach the store and logs every
//! mutation. Reads go straight through to the repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppResult, OptionExt};
use domain::{InventoryMetrics, NewProduct, Product, ProductChanges, ProductOrder};

use crate::repository::ProductRepository;

/// Inventory service trait for dependency injection.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Add a product; the name must not already exist
    async fn add(&self, product: NewProduct) -> AppResult<Product>;

    /// Overwrite the given fields of an existing product
    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product>;

    /// Remove a product
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Get product by ID
    async fn get(&self, id: i32) -> AppResult<Product>;

    /// Look up a product by exact, case-sensitive name
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Case-insensitive substring search over name, category and supplier.
    /// A blank term lists everything.
    async fn search(&self, term: &str, order: ProductOrder) -> AppResult<Vec<Product>>;

    /// Every product in the given order
    async fn list_all(&self, order: ProductOrder) -> AppResult<Vec<Product>>;

    /// Product count, units on hand and stock value
    async fn metrics(&self) -> AppResult<InventoryMetrics>;

    /// Products whose quantity is at or below their reorder level
    async fn low_stock(&self) -> AppResult<Vec<Product>>;
}

/// Concrete implementation of InventoryService using a product repository.
pub struct InventoryManager {
    repo: Arc<dyn ProductRepository>,
}

impl InventoryManager {
    /// Create new inventory service instance with repository
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl InventoryService for InventoryManager {
    async fn add(&self, product: NewProduct) -> AppResult<Product> {
        product.validate()?;

        let created = self.repo.insert(product).await?;
        info!(product_id = created.id, name = %created.name, "Product added");
        warn_if_low(&created);
        Ok(created)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product> {
        changes.validate()?;

        let updated = self.repo.update(id, changes).await?;
        info!(product_id = id, "Product updated");
        warn_if_low(&updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn get(&self, id: i32) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        self.repo.find_by_name(name).await
    }

    async fn search(&self, term: &str, order: ProductOrder) -> AppResult<Vec<Product>> {
        debug!(term, ?order, "Searching products");
        self.repo.search(term, order).await
    }

    async fn list_all(&self, order: ProductOrder) -> AppResult<Vec<Product>> {
        self.repo.list(order).await
    }

    async fn metrics(&self) -> AppResult<InventoryMetrics> {
        self.repo.metrics().await
    }

    async fn low_stock(&self) -> AppResult<Vec<Product>> {
        self.repo.low_stock().await
    }
}

fn warn_if_low(product: &Product) {
    if product.is_low_stock() {
        warn!(
            product_id = product.id,
            quantity = product.quantity,
            reorder_level = product.reorder_level,
            "Product at or below reorder level"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn pen(id: i32, quantity: i64) -> Product {
        Product {
            id,
            name: "Pen".to_string(),
            description: String::new(),
            category: "Stationery".to_string(),
            supplier: "Acme".to_string(),
            quantity,
            price: 10,
            reorder_level: 5,
            added_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_product_before_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().never();

        let service = InventoryManager::new(Arc::new(repo));
        let result = service.add(NewProduct::named("")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_passes_valid_product_to_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|p| p.name == "Pen" && p.quantity == 3)
            .times(1)
            .returning(|_| Ok(pen(1, 3)));

        let service = InventoryManager::new(Arc::new(repo));
        let created = service
            .add(NewProduct::named("Pen").with_quantity(3))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert!(created.is_low_stock());
    }

    #[tokio::test]
    async fn test_duplicate_name_propagates_conflict() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::conflict("Product 'Pen'")));

        let service = InventoryManager::new(Arc::new(repo));
        let result = service.add(NewProduct::named("Pen")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_quantity() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = InventoryManager::new(Arc::new(repo));
        let changes = ProductChanges {
            quantity: Some(-1),
            ..Default::default()
        };

        assert!(service.update(1, changes).await.is_err());
    }

    #[tokio::test]
    async fn test_update_into_low_stock_still_succeeds() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .withf(|id, changes| *id == 1 && changes.quantity == Some(2))
            .times(1)
            .returning(|_, _| Ok(pen(1, 2)));

        let service = InventoryManager::new(Arc::new(repo));
        let changes = ProductChanges {
            quantity: Some(2),
            ..Default::default()
        };
        let updated = service.update(1, changes).await.unwrap();

        assert_eq!(updated.quantity, 2);
        assert!(updated.is_low_stock());
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = InventoryManager::new(Arc::new(repo));

        assert!(matches!(service.get(42).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_by_name_absent_is_none() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));

        let service = InventoryManager::new(Arc::new(repo));

        assert!(service.get_by_name("Ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_forwards_order() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .with(eq(ProductOrder::Quantity))
            .returning(|_| Ok(vec![pen(2, 1), pen(1, 4)]));

        let service = InventoryManager::new(Arc::new(repo));
        let products = service.list_all(ProductOrder::Quantity).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 2);
    }
}
