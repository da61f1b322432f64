//! Product handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{parse_id, Product, ProductResponse};

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::types::ListQuery;

/// Product create/replace request.
///
/// Field invariants are enforced by the domain entity so that errors follow
/// its precedence order.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[schema(example = "Notebook")]
    pub name: String,
    #[schema(example = "A5 dotted notebook")]
    pub description: String,
    #[schema(example = 12.5)]
    pub price: f64,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state
        .product_service
        .create_product(payload.name, payload.description, payload.price)
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// List products by creation time
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Products", body = Vec<Product>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let request = query.page_request();
    let products = state
        .product_service
        .list_products(request.page, request.limit, query.sort_direction())
        .await?;

    Ok(Json(products))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id)?;
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's name, description and price
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    responses(
        (status = 202, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let id = parse_id(&id)?;
    let product = state
        .product_service
        .update_product(id, payload.name, payload.description, payload.price)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(ProductResponse::from(product))))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    state.product_service.delete_product(id).await?;

    tracing::info!(
        product_id = %id,
        deleted_by = %current_user.id,
        deleted_by_email = %current_user.email,
        "Product deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
