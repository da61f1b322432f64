//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::LoginRequest;
use crate::handlers::health_handler::{HealthResponse, StorageHealth};
use crate::handlers::product_handler::ProductRequest;
use crate::handlers::user_handler::{CreateUserRequest, UpdateUserRequest};
use crate::service::TokenResponse;
use domain::{Product, ProductResponse, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::generate_token,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::product_handler::create_product,
        crate::handlers::product_handler::list_products,
        crate::handlers::product_handler::get_product,
        crate::handlers::product_handler::update_product,
        crate::handlers::product_handler::delete_product,
    ),
    components(
        schemas(
            LoginRequest,
            TokenResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            ProductRequest,
            ProductResponse,
            Product,
            HealthResponse,
            StorageHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "User management endpoints"),
        (name = "Products", description = "Product catalogue endpoints"),
        (name = "Health", description = "Liveness and storage checks"),
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
