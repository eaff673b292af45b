use anyhow::Context;
use axum::http::StatusCode;
use dotenvy::dotenv;
use tower_http::timeout::TimeoutLayer;

use shopfront::logging::init_tracing;
use shopfront::router::init_router;
use shopfront::state::init_app_state;
use shopfront_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server = ServerConfig::from_env()?;

    let db = shopfront_db::init_db_pool().await?;
    shopfront_db::run_migrations(&db).await?;

    let state = init_app_state(db, server.app_env)?;
    let app = init_router(state).layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        server.request_timeout,
    ));

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server.bind_addr))?;

    tracing::info!(addr = %server.bind_addr, app_env = ?server.app_env, "🚀 Server running");
    tracing::info!("📚 Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
