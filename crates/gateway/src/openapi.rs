//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{LoginRequest, LoginResponse};
use crate::handlers::product_handler::{CreateProductRequest, UpdateProductRequest};
use crate::session::TokenResponse;
use domain::{InventoryMetrics, Product, UserResponse, UserRole};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::me,
        crate::handlers::product_handler::list_products,
        crate::handlers::product_handler::create_product,
        crate::handlers::product_handler::get_product,
        crate::handlers::product_handler::get_product_by_name,
        crate::handlers::product_handler::update_product,
        crate::handlers::product_handler::delete_product,
        crate::handlers::product_handler::low_stock,
        crate::handlers::product_handler::metrics,
        crate::handlers::product_handler::export_products,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            TokenResponse,
            UserResponse,
            UserRole,
            Product,
            InventoryMetrics,
            CreateProductRequest,
            UpdateProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session endpoints"),
        (name = "Products", description = "Inventory endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
