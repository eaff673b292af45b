//! Cart operations for the calling principal.
//!
//! Every write that names a cart line by id goes through the
//! [`OwnershipGuard`] first, so a caller can only ever touch lines in its
//! own cart.

use tracing::instrument;

use shopfront_auth::PrincipalId;
use shopfront_core::AppError;
use shopfront_models::{AddToCartDto, CartItem, CartLine, NewCartItem};

use crate::middleware::ownership::OwnershipGuard;
use crate::stores::{CartItemStore, CartStore, ParentResourceStore};

const CART_ITEM: &str = "Cart item";

fn product_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Product not found"))
}

pub struct CartService;

impl CartService {
    #[instrument(skip(carts, items))]
    pub async fn list_items(
        carts: &dyn CartStore,
        items: &dyn CartItemStore,
        principal_id: PrincipalId,
    ) -> Result<Vec<CartLine>, AppError> {
        let Some(cart) = carts.get_by_principal(principal_id).await? else {
            return Ok(Vec::new());
        };

        Ok(items.list_for_cart(cart.id).await?)
    }

    #[instrument(skip(carts, items))]
    pub async fn add_item(
        carts: &dyn CartStore,
        items: &dyn CartItemStore,
        principal_id: PrincipalId,
        dto: AddToCartDto,
    ) -> Result<CartItem, AppError> {
        if !items.product_exists(dto.product_id).await? {
            return Err(product_not_found());
        }

        let cart = carts.get_or_create_for_principal(principal_id).await?;

        // The product can still vanish between the check and the insert.
        items
            .add(NewCartItem {
                cart_id: cart.id,
                product_id: dto.product_id,
                quantity: dto.quantity,
            })
            .await?
            .ok_or_else(product_not_found)
    }

    #[instrument(skip(carts, items))]
    pub async fn update_quantity(
        carts: &dyn CartStore,
        items: &dyn CartItemStore,
        principal_id: PrincipalId,
        item_id: i64,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        OwnershipGuard::new(items, carts, CART_ITEM)
            .check(principal_id, item_id)
            .await
            .map_err(|e| e.into_app_error())?;

        items
            .update_quantity(item_id, quantity)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("{CART_ITEM} not found")))
    }

    #[instrument(skip(carts, items))]
    pub async fn remove_item(
        carts: &dyn CartStore,
        items: &dyn CartItemStore,
        principal_id: PrincipalId,
        item_id: i64,
    ) -> Result<(), AppError> {
        OwnershipGuard::new(items, carts, CART_ITEM)
            .check(principal_id, item_id)
            .await
            .map_err(|e| e.into_app_error())?;

        // A concurrent delete of the same line is not an error for the caller.
        items.remove(item_id).await?;
        Ok(())
    }
}
