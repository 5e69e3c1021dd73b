//! Product domain entity, write models and inventory aggregates.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRICE, DEFAULT_QUANTITY, DEFAULT_REORDER_LEVEL};
use crate::error::{DomainError, DomainResult};

/// A stocked product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    /// Unique product name
    pub name: String,
    pub description: String,
    pub category: String,
    pub supplier: String,
    /// Units on hand
    pub quantity: i64,
    /// Unit price in whole currency units
    pub price: i64,
    /// Threshold at or below which the product is low on stock
    pub reorder_level: i64,
    /// Creation timestamp
    pub added_at: DateTime<Utc>,
}

impl Product {
    /// A product is low on stock when its quantity has fallen to or below
    /// its reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Data for adding a product
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default = "default_price")]
    pub price: i64,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
}

fn default_quantity() -> i64 {
    DEFAULT_QUANTITY
}

fn default_price() -> i64 {
    DEFAULT_PRICE
}

fn default_reorder_level() -> i64 {
    DEFAULT_REORDER_LEVEL
}

impl NewProduct {
    /// A product with the given name and every other field defaulted
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            supplier: String::new(),
            quantity: DEFAULT_QUANTITY,
            price: DEFAULT_PRICE,
            reorder_level: DEFAULT_REORDER_LEVEL,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn with_reorder_level(mut self, reorder_level: i64) -> Self {
        self.reorder_level = reorder_level;
        self
    }

    /// Check field rules before anything is written
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_non_negative("quantity", self.quantity)?;
        validate_non_negative("price", self.price)?;
        validate_non_negative("reorder_level", self.reorder_level)
    }
}

/// Partial update of a product's mutable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
    pub reorder_level: Option<i64>,
}

impl ProductChanges {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &ProductChanges::default()
    }

    /// Check the rules for every field that is set
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_non_negative("quantity", quantity)?;
        }
        if let Some(price) = self.price {
            validate_non_negative("price", price)?;
        }
        if let Some(reorder_level) = self.reorder_level {
            validate_non_negative("reorder_level", reorder_level)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Product name is required"));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

/// Inventory-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InventoryMetrics {
    /// Number of distinct products
    pub count: u64,
    /// Units on hand across all products
    pub total_quantity: i64,
    /// Sum of price * quantity across all products
    pub total_value: i64,
}

impl InventoryMetrics {
    /// Fold one product row into the totals
    pub fn record(mut self, quantity: i64, price: i64) -> Self {
        self.count += 1;
        self.total_quantity = self.total_quantity.saturating_add(quantity);
        self.total_value = self
            .total_value
            .saturating_add(price.saturating_mul(quantity));
        self
    }
}

/// Sort order for product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProductOrder {
    /// Most recently added first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Alphabetical by name
    Name,
    /// Fewest units first
    Quantity,
}

impl FromStr for ProductOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(ProductOrder::Newest),
            "oldest" => Ok(ProductOrder::Oldest),
            "name" => Ok(ProductOrder::Name),
            "quantity" => Ok(ProductOrder::Quantity),
            other => Err(DomainError::validation(format!(
                "Unknown order '{}'. Expected newest, oldest, name or quantity",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64, reorder_level: i64) -> Product {
        Product {
            id: 1,
            name: "Pen".to_string(),
            description: String::new(),
            category: String::new(),
            supplier: String::new(),
            quantity,
            price: 10,
            reorder_level,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(product(3, 5).is_low_stock());
        assert!(product(5, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
        assert!(product(0, 0).is_low_stock());
    }

    #[test]
    fn test_new_product_defaults() {
        let draft = NewProduct::named("Pen");
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.price, 0);
        assert_eq!(draft.reorder_level, 5);
        assert!(draft.description.is_empty());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_new_product_defaults_when_deserialized() {
        let draft: NewProduct = serde_json::from_str(r#"{"name":"Stapler"}"#).unwrap();
        assert_eq!(draft, NewProduct::named("Stapler"));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            NewProduct::named("   ").validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_numbers_rejected() {
        assert!(NewProduct::named("Pen").with_quantity(-1).validate().is_err());
        assert!(NewProduct::named("Pen").with_price(-1).validate().is_err());
        assert!(NewProduct::named("Pen")
            .with_reorder_level(-1)
            .validate()
            .is_err());

        let changes = ProductChanges {
            quantity: Some(-3),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn test_empty_changes() {
        assert!(ProductChanges::default().is_empty());
        let changes = ProductChanges {
            price: Some(0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        assert!(changes.validate().is_ok());
    }

    #[test]
    fn test_metrics_fold() {
        let metrics = InventoryMetrics::default().record(10, 10).record(2, 7);
        assert_eq!(
            metrics,
            InventoryMetrics {
                count: 2,
                total_quantity: 12,
                total_value: 114,
            }
        );
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("newest".parse::<ProductOrder>().unwrap(), ProductOrder::Newest);
        assert_eq!("quantity".parse::<ProductOrder>().unwrap(), ProductOrder::Quantity);
        assert!("price".parse::<ProductOrder>().is_err());
        assert_eq!(ProductOrder::default(), ProductOrder::Newest);
    }
}
