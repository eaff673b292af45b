use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_admin;
use crate::state::AppState;

use super::controller::{create_product, delete_product, get_product, list_products, update_product};

pub fn init_products_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .merge(admin)
}
