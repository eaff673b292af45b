use axum::{Router, middleware, routing::put};

use crate::middleware::auth::require_admin;
use crate::state::AppState;

use super::controller::set_user_role;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}/role", put(set_user_role))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
