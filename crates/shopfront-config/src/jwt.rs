//! Token signing configuration.
//!
//! The signing secret is read once at startup and handed to the token codec.
//! It is never mutated afterwards.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret. Required in production.
//! - `JWT_TTL_SECS`: token validity window in seconds (default: 86400, i.e. 24 hours)

use std::env;

use crate::ConfigError;
use crate::server::AppEnv;

const DEV_SECRET: &str = "shopfront-dev-secret-change-me";
const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn from_env(app_env: AppEnv) -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_TTL_SECS").ok(),
            app_env,
        )
    }

    fn from_vars(
        secret: Option<String>,
        ttl: Option<String>,
        app_env: AppEnv,
    ) -> Result<Self, ConfigError> {
        let secret = match secret {
            Some(s) if s.trim().is_empty() => return Err(ConfigError::Invalid("JWT_SECRET")),
            Some(s) => s,
            None if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
        };

        let token_ttl_secs = match ttl {
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) if v > 0 => v,
                _ => return Err(ConfigError::Invalid("JWT_TTL_SECS")),
            },
            None => DEFAULT_TTL_SECS,
        };

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }
}
