use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shopfront_auth::PrincipalId;
use shopfront_models::{
    Cart, CartItem, CartLine, MAX_LINE_QUANTITY, NewCartItem, Principal, UserRole,
};

use super::{
    CartItemStore, CartStore, ParentResourceStore, PrincipalStore, StoreError, SubResourceStore,
};

const CART_ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, price, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    db: PgPool,
}

impl PgPrincipalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    #[instrument(skip(self))]
    async fn find_principal(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String)>("SELECT id, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        let Some((id, role)) = row else {
            return Ok(None);
        };

        let role = role
            .parse::<UserRole>()
            .map_err(|e| StoreError::Corrupt(format!("user {id}: {e}")))?;

        Ok(Some(Principal { id, role }))
    }
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
    db: PgPool,
}

impl PgCartStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ParentResourceStore for PgCartStore {
    type Resource = Cart;

    #[instrument(skip(self))]
    async fn get_by_principal(&self, principal_id: PrincipalId) -> Result<Option<Cart>, StoreError> {
        let cart = sqlx::query_as::<_, Cart>("SELECT id, user_id FROM carts WHERE user_id = $1")
            .bind(principal_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(cart)
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    #[instrument(skip(self))]
    async fn get_or_create_for_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Cart, StoreError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let cart = sqlx::query_as::<_, Cart>(
            r#"INSERT INTO carts (user_id)
               VALUES ($1)
               ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
               RETURNING id, user_id"#,
        )
        .bind(principal_id)
        .fetch_one(&self.db)
        .await?;

        Ok(cart)
    }
}

#[derive(Debug, Clone)]
pub struct PgCartItemStore {
    db: PgPool,
}

impl PgCartItemStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubResourceStore for PgCartItemStore {
    type Resource = CartItem;

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<CartItem>, StoreError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }
}

#[async_trait]
impl CartItemStore for PgCartItemStore {
    #[instrument(skip(self))]
    async fn product_exists(&self, product_id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn list_for_cart(&self, cart_id: i64) -> Result<Vec<CartLine>, StoreError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.price,
                      p.name AS product_name,
                      p.price AS product_price,
                      p.stock_quantity AS product_stock,
                      ci.created_at, ci.updated_at
               FROM cart_items ci
               JOIN products p ON p.id = ci.product_id
               WHERE ci.cart_id = $1
               ORDER BY ci.id"#,
        )
        .bind(cart_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn add(&self, item: NewCartItem) -> Result<Option<CartItem>, StoreError> {
        let added = sqlx::query_as::<_, CartItem>(&format!(
            r#"INSERT INTO cart_items (cart_id, product_id, quantity, price)
               SELECT $1, p.id, $3, p.price FROM products p WHERE p.id = $2
               ON CONFLICT (cart_id, product_id) DO UPDATE
                   SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, $4),
                       price = EXCLUDED.price,
                       updated_at = NOW()
               RETURNING {CART_ITEM_COLUMNS}"#
        ))
        .bind(item.cart_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(MAX_LINE_QUANTITY)
        .fetch_optional(&self.db)
        .await?;

        Ok(added)
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        id: i64,
        quantity: i32,
    ) -> Result<Option<CartItem>, StoreError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            r#"UPDATE cart_items SET quantity = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING {CART_ITEM_COLUMNS}"#
        ))
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
