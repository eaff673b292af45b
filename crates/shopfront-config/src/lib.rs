//! # Shopfront Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and validity window
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address, request deadline and deployment environment
//!
//! # Example
//!
//! ```ignore
//! use shopfront_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env()?;
//! let jwt = JwtConfig::from_env(server.app_env)?;
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::{AppEnv, ServerConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
