mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{bearer, delete, get, post_json, put_json, send};
use shopfront::router::init_router;
use shopfront::stores::ParentResourceStore;
use shopfront::testing::{InMemoryCartItems, InMemoryCarts, InMemoryPrincipals, TestContext};
use shopfront_models::UserRole;

const OWNER: i64 = 42;
const OTHER: i64 = 7;

/// Principal 42 owns cart 10; principal 7 owns cart 99, which holds item 5.
fn context() -> TestContext {
    TestContext::new(
        InMemoryPrincipals::default()
            .with_principal(OWNER, UserRole::Member)
            .with_principal(OTHER, UserRole::Member),
    )
    .with_carts(
        InMemoryCarts::default().with_cart(10, OWNER).with_cart(99, OTHER),
        InMemoryCartItems::default()
            .with_product(1, "House Blend 200g", 1200, 30)
            .with_item(5, 99, 1)
            .with_item(6, 10, 2),
    )
}

#[tokio::test]
async fn test_removing_another_users_item_is_not_found() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(&app, delete("/api/cart/items/5", Some(&bearer(&token)))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Cart item not found" }));

    // Still there for its real owner.
    let other = ctx.token_for(OTHER);
    let (_, cart) = send(&app, get("/api/cart", Some(&bearer(&other)))).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_removing_missing_item_matches_foreign_item_response() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let foreign = send(&app, delete("/api/cart/items/5", Some(&bearer(&token)))).await;
    let missing = send(&app, delete("/api/cart/items/999", Some(&bearer(&token)))).await;

    assert_eq!(foreign, missing);
}

#[tokio::test]
async fn test_removing_own_item_succeeds() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(&app, delete("/api/cart/items/6", Some(&bearer(&token)))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, cart) = send(&app, get("/api/cart", Some(&bearer(&token)))).await;
    assert_eq!(cart, json!({ "items": [] }));
}

#[tokio::test]
async fn test_updating_another_users_item_is_not_found() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, _) = send(
        &app,
        put_json("/api/cart/items/5", Some(&bearer(&token)), json!({ "quantity": 9 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_updating_own_item_changes_quantity() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(
        &app,
        put_json("/api/cart/items/6", Some(&bearer(&token)), json!({ "quantity": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["id"], 6);
    assert_eq!(body["item"]["quantity"], 4);
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(
        &app,
        put_json("/api/cart/items/6", Some(&bearer(&token)), json!({ "quantity": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "quantity must be between 1 and 999" }));
}

#[tokio::test]
async fn test_adding_creates_cart_on_demand() {
    let ctx = TestContext::new(InMemoryPrincipals::default().with_principal(3, UserRole::Member))
        .with_carts(
            InMemoryCarts::default(),
            InMemoryCartItems::default().with_product(1, "House Blend 200g", 1200, 30),
        );
    let app = init_router(ctx.state());
    let token = ctx.token_for(3);

    let (status, body) = send(
        &app,
        post_json(
            "/api/cart/items",
            Some(&bearer(&token)),
            json!({ "product_id": 1, "quantity": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["price"], 1200);

    let (status, cart) = send(&app, get("/api/cart", Some(&bearer(&token)))).await;
    assert_eq!(status, StatusCode::OK);
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_name"], "House Blend 200g");
    assert_eq!(items[0]["quantity"], 2);
}

#[tokio::test]
async fn test_adding_unknown_product_is_not_found() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(
        &app,
        post_json(
            "/api/cart/items",
            Some(&bearer(&token)),
            json!({ "product_id": 77, "quantity": 1 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn test_adding_unknown_product_does_not_create_a_cart() {
    let ctx = TestContext::new(InMemoryPrincipals::default().with_principal(3, UserRole::Member))
        .with_carts(InMemoryCarts::default(), InMemoryCartItems::default());
    let app = init_router(ctx.state());
    let token = ctx.token_for(3);

    let (status, _) = send(
        &app,
        post_json(
            "/api/cart/items",
            Some(&bearer(&token)),
            json!({ "product_id": 77, "quantity": 1 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(ctx.carts.get_by_principal(3).await.unwrap().is_none());
}

#[tokio::test]
async fn test_oversized_quantity_is_rejected() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let (status, body) = send(
        &app,
        post_json(
            "/api/cart/items",
            Some(&bearer(&token)),
            json!({ "product_id": 1, "quantity": i32::MAX }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "quantity must be between 1 and 999" }));
}

#[tokio::test]
async fn test_non_numeric_item_id_is_a_json_bad_request() {
    let ctx = context();
    let app = init_router(ctx.state());
    let token = ctx.token_for(OWNER);

    let removed = send(&app, delete("/api/cart/items/abc", Some(&bearer(&token)))).await;
    let updated = send(
        &app,
        put_json("/api/cart/items/abc", Some(&bearer(&token)), json!({ "quantity": 1 })),
    )
    .await;

    for (status, body) in [removed, updated] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid id" }));
    }
}

#[tokio::test]
async fn test_cart_requires_authentication() {
    let app = init_router(context().state());

    let (status, _) = send(&app, delete("/api/cart/items/6", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
