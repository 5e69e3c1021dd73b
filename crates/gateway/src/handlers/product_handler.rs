//! Product handlers.
//!
//! Every route runs behind the session middleware; each handler checks the
//! caller's role against the action it performs before touching the store.

use axum::{
    extract::{Extension, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{
    Action, InventoryMetrics, NewProduct, Product, ProductChanges, ProductOrder, DEFAULT_PRICE,
    DEFAULT_QUANTITY, DEFAULT_REORDER_LEVEL,
};
use inventory_service_lib::export::{self, EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_permission, CurrentUser};
use crate::state::AppState;

/// Search and ordering parameters for the product list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Case-insensitive substring of name, category or supplier
    pub q: Option<String>,
    /// newest (default), oldest, name or quantity
    pub order: Option<String>,
}

impl ProductQuery {
    fn order(&self) -> AppResult<ProductOrder> {
        match self.order.as_deref() {
            Some(raw) => Ok(raw.parse::<ProductOrder>()?),
            None => Ok(ProductOrder::default()),
        }
    }
}

/// Request body for adding a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Pen")]
    pub name: String,
    #[schema(example = "Blue ballpoint")]
    pub description: Option<String>,
    #[schema(example = "Stationery")]
    pub category: Option<String>,
    #[schema(example = "Acme")]
    pub supplier: Option<String>,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    #[schema(example = 3)]
    pub quantity: Option<i64>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    #[schema(example = 10)]
    pub price: Option<i64>,
    #[validate(range(min = 0, message = "reorder_level must not be negative"))]
    #[schema(example = 5)]
    pub reorder_level: Option<i64>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name,
            description: req.description.unwrap_or_default(),
            category: req.category.unwrap_or_default(),
            supplier: req.supplier.unwrap_or_default(),
            quantity: req.quantity.unwrap_or(DEFAULT_QUANTITY),
            price: req.price.unwrap_or(DEFAULT_PRICE),
            reorder_level: req.reorder_level.unwrap_or(DEFAULT_REORDER_LEVEL),
        }
    }
}

/// Request body for updating a product; omitted fields are left as they are
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    #[schema(example = 10)]
    pub quantity: Option<i64>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: Option<i64>,
    #[validate(range(min = 0, message = "reorder_level must not be negative"))]
    pub reorder_level: Option<i64>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        ProductChanges {
            name: req.name,
            description: req.description,
            category: req.category,
            supplier: req.supplier,
            quantity: req.quantity,
            price: req.price,
            reorder_level: req.reorder_level,
        }
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(low_stock))
        .route("/metrics", get(metrics))
        .route("/export", get(export_products))
        .route("/by-name/:name", get(get_product_by_name))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Search products, or list them all when no term is given
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Unknown order"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_products(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    require_permission(&state, &current, Action::ViewProducts)?;
    let order = query.order()?;

    let products = match query.q.as_deref() {
        Some(term) => state.inventory.search(term, order).await?,
        None => state.inventory.list_all(order).await?,
    };
    Ok(Json(products))
}

/// Add a product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "A product with this name exists")
    )
)]
pub async fn create_product(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    require_permission(&state, &current, Action::AddProduct)?;
    let product = state.inventory.add(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    require_permission(&state, &current, Action::ViewProducts)?;
    Ok(Json(state.inventory.get(id).await?))
}

/// Get product by exact name
#[utoipa::path(
    get,
    path = "/products/by-name/{name}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Exact, case-sensitive product name")
    ),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_by_name(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Product>> {
    require_permission(&state, &current, Action::ViewProducts)?;
    let product = state
        .inventory
        .get_by_name(&name)
        .await?
        .ok_or_not_found()?;
    Ok(Json(product))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "A product with this name exists")
    )
)]
pub async fn update_product(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    require_permission(&state, &current, Action::UpdateProduct)?;
    let product = state.inventory.update(id, payload.into()).await?;
    Ok(Json(product))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    require_permission(&state, &current, Action::DeleteProduct)?;
    state.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Products at or below their reorder level
#[utoipa::path(
    get,
    path = "/products/low-stock",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Low-stock products, fewest units first", body = Vec<Product>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn low_stock(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    require_permission(&state, &current, Action::ViewLowStock)?;
    Ok(Json(state.inventory.low_stock().await?))
}

/// Inventory totals
#[utoipa::path(
    get,
    path = "/products/metrics",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product count, units and stock value", body = InventoryMetrics),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn metrics(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<InventoryMetrics>> {
    require_permission(&state, &current, Action::ViewMetrics)?;
    Ok(Json(state.inventory.metrics().await?))
}

/// Download every product as an xlsx workbook
#[utoipa::path(
    get,
    path = "/products/export",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "storage_data.xlsx", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn export_products(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Response> {
    require_permission(&state, &current, Action::ExportProducts)?;

    let products = state.inventory.list_all(ProductOrder::Oldest).await?;
    let bytes = export::to_bytes(&products)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    #[test]
    fn test_create_request_fills_defaults() {
        let req = CreateProductRequest {
            name: "Pen".to_string(),
            description: None,
            category: Some("Stationery".to_string()),
            supplier: None,
            quantity: Some(3),
            price: None,
            reorder_level: None,
        };

        let draft = NewProduct::from(req);
        assert_eq!(draft, NewProduct::named("Pen").with_category("Stationery").with_quantity(3));
    }

    #[test]
    fn test_query_order_parsing() {
        let query = ProductQuery {
            q: None,
            order: Some("name".to_string()),
        };
        assert_eq!(query.order().unwrap(), ProductOrder::Name);
        assert_eq!(ProductQuery::default().order().unwrap(), ProductOrder::Newest);

        let bad = ProductQuery {
            q: None,
            order: Some("price".to_string()),
        };
        assert!(matches!(bad.order(), Err(AppError::Validation(_))));
    }
}
