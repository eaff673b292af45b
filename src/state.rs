use std::sync::Arc;

use sqlx::PgPool;

use shopfront_auth::TokenCodec;
use shopfront_config::{AppEnv, ConfigError, CorsConfig, JwtConfig};

use crate::middleware::gate::AuthorizationGate;
use crate::stores::{
    CartItemStore, CartStore, PgCartItemStore, PgCartStore, PgPrincipalStore, PrincipalStore,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub codec: TokenCodec,
    pub gate: AuthorizationGate,
    pub carts: Arc<dyn CartStore>,
    pub cart_items: Arc<dyn CartItemStore>,
}

impl AppState {
    /// Wires the Postgres-backed stores around `db`.
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        let codec = TokenCodec::from_config(&jwt_config);
        let principals: Arc<dyn PrincipalStore> = Arc::new(PgPrincipalStore::new(db.clone()));
        let gate = AuthorizationGate::new(Arc::new(codec.clone()), principals);

        Self {
            carts: Arc::new(PgCartStore::new(db.clone())),
            cart_items: Arc::new(PgCartItemStore::new(db.clone())),
            db,
            jwt_config,
            cors_config,
            codec,
            gate,
        }
    }
}

pub fn init_app_state(db: PgPool, app_env: AppEnv) -> Result<AppState, ConfigError> {
    Ok(AppState::new(
        db,
        JwtConfig::from_env(app_env)?,
        CorsConfig::from_env(),
    ))
}
