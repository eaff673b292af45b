use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{add_to_cart, get_cart, remove_cart_item, update_cart_item};

pub fn init_cart_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/items", post(add_to_cart))
        .route("/items/{id}", put(update_cart_item).delete(remove_cart_item))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
