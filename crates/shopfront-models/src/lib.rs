//! # Shopfront Models
//!
//! Domain rows and request/response DTOs for the Shopfront API.
//!
//! - [`users`]: accounts, roles and the [`Principal`] resolved per request
//! - [`categories`]: product categories
//! - [`products`]: catalogue entries
//! - [`cart`]: per-user carts and their line items

pub mod cart;
pub mod categories;
pub mod products;
pub mod users;

mod validation;

// Re-export commonly used types at crate root for convenience
pub use cart::{
    AddToCartDto, Cart, CartItem, CartItemResponse, CartLine, CartResponse, MAX_LINE_QUANTITY,
    NewCartItem, UpdateCartItemDto,
};
pub use categories::{CategoriesResponse, Category, CategoryDto};
pub use products::{Product, ProductDto, ProductsResponse};
pub use users::{
    LoginRequest, LoginResponse, MeResponse, Principal, RegisterRequestDto, SetUserRoleDto,
    UnknownRole, User, UserRole, UserRow, UserSummary,
};
