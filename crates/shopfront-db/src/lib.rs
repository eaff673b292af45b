//! # Shopfront DB
//!
//! Postgres pool initialisation for the Shopfront API.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: Postgres connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//!
//! # Example
//!
//! ```ignore
//! use shopfront_db::init_db_pool;
//!
//! let pool = init_db_pool().await?;
//! shopfront_db::run_migrations(&pool).await?;
//! ```

use std::env;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
///
/// The returned pool is cheap to clone and is shared by every request.
/// Queries issued through it are cancelled when the awaiting request
/// future is dropped.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}
