use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_admin;
use crate::state::AppState;

use super::controller::{create_category, delete_category, list_categories, update_category};

pub fn init_categories_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new().route("/", get(list_categories)).merge(admin)
}
