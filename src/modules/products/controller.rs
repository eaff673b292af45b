use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{Product, ProductDto, ProductsResponse};

use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson};

use super::service::ProductService;

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = ProductsResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductService::list_products(&state.db).await?;
    Ok(Json(ProductsResponse { products }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::get_product(&state.db, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "SKU already exists")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductService::create_product(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "Product or category not found"),
        (status = 409, description = "SKU already exists")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<ProductDto>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::update_product(&state.db, id, dto).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "Product not found")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    ProductService::delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
