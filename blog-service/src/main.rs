use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod storage;

#[cfg(test)]
mod testing;

use config::{Config, UploadConfig};
use db::{PgStore, Store};
use storage::{ObjectStorage, S3Bucket};

/// Application state shared across handlers.
/// Built once in `main`; nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Store>,
    pub storage: Arc<dyn ObjectStorage>,
    pub upload: UploadConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    shared::init_logging(config.logging.to_log_config())?;

    info!("Starting Blog Service v{}", env!("CARGO_PKG_VERSION"));

    // Initialize database connection pool
    let pool = shared::create_connection_pool(&config.database).await?;
    shared::test_connection(&pool).await?;
    db::run_migrations(&pool).await?;

    // Initialize storage client
    let bucket = S3Bucket::connect(&config.storage).await;
    info!("Storage client initialized for bucket {}", bucket.bucket());

    let state = AppState {
        db: Arc::new(PgStore::new(pool.clone())),
        storage: Arc::new(bucket),
        upload: config.upload.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Blog Service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shared::database::close_connections(&pool).await;
    info!("Blog Service shut down gracefully");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.upload.max_body_bytes();

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/new", post(handlers::posts::create_post))
        .route("/posts", get(handlers::posts::list_posts))
        .route(
            "/post/:id",
            get(handlers::posts::get_post)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route("/contact", post(handlers::contact::create_contact))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// Graceful shutdown handler
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
