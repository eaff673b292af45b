//! Persistence collaborators used by the authorization gate and the
//! ownership guard.
//!
//! Each store is an object-safe async trait so the server can hold
//! `Arc<dyn ...>` handles in [`AppState`](crate::state::AppState) and tests
//! can swap in the in-memory versions from `crate::testing`.
//!
//! A missing record is `Ok(None)`. `Err` is reserved for failures of the
//! store itself, which callers surface as a generic 500.

use async_trait::async_trait;
use thiserror::Error;

use shopfront_auth::PrincipalId;
use shopfront_models::{Cart, CartItem, CartLine, NewCartItem, Principal};

pub mod postgres;

pub use postgres::{PgCartItemStore, PgCartStore, PgPrincipalStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Resolves a principal id into the current account id and role.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_principal(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError>;
}

/// A record that belongs to exactly one parent.
pub trait SubResource {
    type ParentKey: PartialEq;

    fn parent_key(&self) -> Self::ParentKey;
}

/// A record owned by a principal, addressed by its own key.
pub trait ParentResource {
    type Key;

    fn key(&self) -> Self::Key;
}

#[async_trait]
pub trait SubResourceStore: Send + Sync {
    type Resource: SubResource + Send;

    async fn get_by_id(&self, id: i64) -> Result<Option<Self::Resource>, StoreError>;
}

#[async_trait]
pub trait ParentResourceStore: Send + Sync {
    type Resource: ParentResource + Send;

    async fn get_by_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Option<Self::Resource>, StoreError>;
}

impl SubResource for CartItem {
    type ParentKey = i64;

    fn parent_key(&self) -> i64 {
        self.cart_id
    }
}

impl ParentResource for Cart {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

#[async_trait]
pub trait CartStore: ParentResourceStore<Resource = Cart> {
    async fn get_or_create_for_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Cart, StoreError>;
}

#[async_trait]
pub trait CartItemStore: SubResourceStore<Resource = CartItem> {
    async fn product_exists(&self, product_id: i64) -> Result<bool, StoreError>;

    async fn list_for_cart(&self, cart_id: i64) -> Result<Vec<CartLine>, StoreError>;

    /// Adds `quantity` of a product to a cart, merging with an existing line
    /// for the same product, clamped to
    /// [`MAX_LINE_QUANTITY`](shopfront_models::MAX_LINE_QUANTITY). Returns `None`
    /// when the product does not exist.
    async fn add(&self, item: NewCartItem) -> Result<Option<CartItem>, StoreError>;

    async fn update_quantity(
        &self,
        id: i64,
        quantity: i32,
    ) -> Result<Option<CartItem>, StoreError>;

    /// Returns whether a line was deleted.
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;
}
