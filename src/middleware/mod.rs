//! Request authorization.
//!
//! - [`gate`]: the staged [`AuthorizationGate`](gate::AuthorizationGate)
//! - [`auth`]: `require_auth` / `require_admin` route layers and the
//!   [`AuthUser`](auth::AuthUser) extractor
//! - [`ownership`]: the [`OwnershipGuard`](ownership::OwnershipGuard) used
//!   before mutating caller-scoped sub-resources
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The route layer runs the gate and stores the principal id in the
//!    request extensions
//! 3. The handler reads it back with `AuthUser`
//! 4. Handlers touching cart lines confirm ownership before writing
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/", post(create_category))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//!
//! async fn create_category(AuthUser(id): AuthUser) -> impl IntoResponse {
//!     // only admins get here
//! }
//! ```

pub mod auth;
pub mod gate;
pub mod ownership;
