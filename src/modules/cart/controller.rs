use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{AddToCartDto, CartItemResponse, CartResponse, UpdateCartItemDto};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson};

use super::service::CartService;

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Lines in the caller's cart", body = CartResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Cart",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CartResponse>, AppError> {
    let items =
        CartService::list_items(&*state.carts, &*state.cart_items, auth_user.id()).await?;
    Ok(Json(CartResponse { items }))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddToCartDto,
    responses(
        (status = 201, description = "Item added", body = CartItemResponse),
        (status = 400, description = "quantity must be between 1 and 999"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "Cart",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<AddToCartDto>,
) -> Result<(StatusCode, Json<CartItemResponse>), AppError> {
    let item =
        CartService::add_item(&*state.carts, &*state.cart_items, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(CartItemResponse { item })))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    params(("id" = i64, Path, description = "Cart item ID")),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Quantity updated", body = CartItemResponse),
        (status = 400, description = "quantity must be between 1 and 999"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found")
    ),
    tag = "Cart",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<UpdateCartItemDto>,
) -> Result<Json<CartItemResponse>, AppError> {
    let item = CartService::update_quantity(
        &*state.carts,
        &*state.cart_items,
        auth_user.id(),
        id,
        dto.quantity,
    )
    .await?;
    Ok(Json(CartItemResponse { item }))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = i64, Path, description = "Cart item ID")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found")
    ),
    tag = "Cart",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    CartService::remove_item(&*state.carts, &*state.cart_items, auth_user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
