//! Product repository backed by SeaORM.
//!
//! Every write is a single statement. Name uniqueness is enforced by the
//! UNIQUE index, and a violation is reported as a conflict.

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select, Set, SqlErr,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult};
use domain::{InventoryMetrics, NewProduct, Product, ProductChanges, ProductOrder};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product, failing with a conflict if the name is taken
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    /// Apply the given changes to an existing product
    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product>;

    /// Remove a product by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Find product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Find product by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Products whose name, category or supplier contain the term, ignoring case
    async fn search(&self, term: &str, order: ProductOrder) -> AppResult<Vec<Product>>;

    /// All products in the given order
    async fn list(&self, order: ProductOrder) -> AppResult<Vec<Product>>;

    /// Products at or below their reorder level
    async fn low_stock(&self) -> AppResult<Vec<Product>>;

    /// Totals across every product
    async fn metrics(&self) -> AppResult<InventoryMetrics>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn duplicate_name(name: &str) -> AppError {
    AppError::conflict(format!("Product '{}'", name))
}

/// Map a write failure, turning a unique-constraint hit into a conflict.
fn write_error(err: DbErr, name: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_name(name),
        _ => AppError::from(err),
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains_ignore_case(column: product::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn ordered(query: Select<ProductEntity>, order: ProductOrder) -> Select<ProductEntity> {
    match order {
        ProductOrder::Newest => query.order_by_desc(product::Column::Id),
        ProductOrder::Oldest => query.order_by_asc(product::Column::Id),
        ProductOrder::Name => query
            .order_by_asc(product::Column::Name)
            .order_by_desc(product::Column::Id),
        ProductOrder::Quantity => query
            .order_by_asc(product::Column::Quantity)
            .order_by_desc(product::Column::Id),
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let name = product.name.clone();
        let active_model = ActiveModel {
            name: Set(product.name),
            description: Set(product.description),
            category: Set(product.category),
            supplier: Set(product.supplier),
            quantity: Set(product.quantity),
            price: Set(product.price),
            reorder_level: Set(product.reorder_level),
            added_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &name))?;

        Ok(Product::from(model))
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product> {
        if changes.is_empty() {
            return self.find_by_id(id).await?.ok_or(AppError::NotFound);
        }

        let name = changes.name.clone();
        let mut statement = ProductEntity::update_many().filter(product::Column::Id.eq(id));

        if let Some(value) = changes.name {
            statement = statement.col_expr(product::Column::Name, Expr::value(value));
        }
        if let Some(value) = changes.description {
            statement = statement.col_expr(product::Column::Description, Expr::value(value));
        }
        if let Some(value) = changes.category {
            statement = statement.col_expr(product::Column::Category, Expr::value(value));
        }
        if let Some(value) = changes.supplier {
            statement = statement.col_expr(product::Column::Supplier, Expr::value(value));
        }
        if let Some(value) = changes.quantity {
            statement = statement.col_expr(product::Column::Quantity, Expr::value(value));
        }
        if let Some(value) = changes.price {
            statement = statement.col_expr(product::Column::Price, Expr::value(value));
        }
        if let Some(value) = changes.reorder_level {
            statement = statement.col_expr(product::Column::ReorderLevel, Expr::value(value));
        }

        let result = statement
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, name.as_deref().unwrap_or_default()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let result = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn search(&self, term: &str, order: ProductOrder) -> AppResult<Vec<Product>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list(order).await;
        }

        let pattern = format!("%{}%", escape_like(&term.to_ascii_lowercase()));
        let condition = Condition::any()
            .add(contains_ignore_case(product::Column::Name, &pattern))
            .add(contains_ignore_case(product::Column::Category, &pattern))
            .add(contains_ignore_case(product::Column::Supplier, &pattern));

        let models = ordered(ProductEntity::find().filter(condition), order)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn list(&self, order: ProductOrder) -> AppResult<Vec<Product>> {
        let models = ordered(ProductEntity::find(), order)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn low_stock(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(
                Expr::col(product::Column::Quantity).lte(Expr::col(product::Column::ReorderLevel)),
            )
            .order_by_asc(product::Column::Quantity)
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn metrics(&self) -> AppResult<InventoryMetrics> {
        let metrics = ProductEntity::find()
            .stream(&self.db)
            .await?
            .try_fold(InventoryMetrics::default(), |totals, model| async move {
                Ok::<_, DbErr>(totals.record(model.quantity, model.price))
            })
            .await?;

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("widget"), "widget");
    }
}
