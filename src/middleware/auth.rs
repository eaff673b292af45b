use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use shopfront_auth::PrincipalId;
use shopfront_core::AppError;

use crate::middleware::gate::{AuthPrincipal, GateMode, GateRejection, UNAUTHENTICATED_MESSAGE};
use crate::state::AppState;

/// Route layer admitting any authenticated principal.
///
/// ```rust,ignore
/// Router::new()
///     .route("/", get(get_cart))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    run_gate(&state, req, next, GateMode::AuthenticatedOnly).await
}

/// Route layer admitting only principals whose stored role is admin.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    run_gate(&state, req, next, GateMode::AdminOnly).await
}

async fn run_gate(
    state: &AppState,
    mut req: Request,
    next: Next,
    mode: GateMode,
) -> Result<Response, GateRejection> {
    let principal = state.gate.authorize(req.headers(), mode).await?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// The principal id published by the gate.
///
/// Handlers behind [`require_auth`] or [`require_admin`] take this as an
/// argument. Reaching a handler without passing the gate answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub PrincipalId);

impl AuthUser {
    pub fn id(&self) -> PrincipalId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPrincipal>()
            .map(|principal| AuthUser(principal.id))
            .ok_or_else(|| AppError::unauthorized(UNAUTHENTICATED_MESSAGE))
    }
}
