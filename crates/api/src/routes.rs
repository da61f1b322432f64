//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    auth_routes, health_routes, product_routes, protected_user_routes, public_user_routes,
};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Token issuance (no auth)
        .nest("/auth", auth_routes())
        // Registration is public, everything else under /users needs a token
        .nest(
            "/users",
            public_user_routes().merge(protected_user_routes().route_layer(auth_layer.clone())),
        )
        .nest("/products", product_routes().route_layer(auth_layer))
        .with_state(state)
}
