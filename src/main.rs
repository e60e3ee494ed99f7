use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warehouse::api::AppState;
use warehouse::catalog::SeaOrmCatalog;
use warehouse::config::{ServerConfig, DEFAULT_LOG_FILTER};
use warehouse::db;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let db = db::init_database(&config.db_path)
        .await
        .expect("Failed to initialize database");
    tracing::info!("Database initialized at {:?}", config.db_path);

    let catalog = SeaOrmCatalog::new(Arc::new(db));
    let state = Arc::new(AppState::new(Arc::new(catalog)));

    let app = warehouse::app(state);

    tracing::info!("Warehouse server starting on http://{}", config.bind_addr);
    tracing::info!("  GET /cars/:id/ - Car detail with compatible filters");
    tracing::info!("  GET /health    - Liveness check");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
