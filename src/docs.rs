use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use shopfront_models::{
    AddToCartDto, CartItem, CartItemResponse, CartLine, CartResponse, CategoriesResponse,
    Category, CategoryDto, LoginRequest, LoginResponse, MeResponse, Product, ProductDto,
    ProductsResponse, RegisterRequestDto, SetUserRoleDto, UpdateCartItemDto, User, UserRole,
    UserSummary,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::users::controller::set_user_role,
        crate::modules::categories::controller::list_categories,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::products::controller::list_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::cart::controller::get_cart,
        crate::modules::cart::controller::add_to_cart,
        crate::modules::cart::controller::update_cart_item,
        crate::modules::cart::controller::remove_cart_item,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            User,
            UserRole,
            UserSummary,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            MeResponse,
            SetUserRoleDto,
            Category,
            CategoryDto,
            CategoriesResponse,
            Product,
            ProductDto,
            ProductsResponse,
            CartItem,
            CartLine,
            CartResponse,
            CartItemResponse,
            AddToCartDto,
            UpdateCartItemDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Users", description = "User administration"),
        (name = "Categories", description = "Product categories"),
        (name = "Products", description = "Product catalogue"),
        (name = "Cart", description = "The caller's shopping cart")
    ),
    info(
        title = "Shopfront API",
        version = "0.1.0",
        description = "Storefront REST API built with Rust, Axum, and PostgreSQL using stateless bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

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
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_declare_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(doc.paths.paths.contains_key("/api/cart/items/{id}"));
        assert!(doc.paths.paths.contains_key("/api/users/{id}/role"));
    }
}
