//! Car and replacement filter catalog for a repair-shop warehouse.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod web_ui;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use api::AppState;

/// Build the full application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .merge(web_ui::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeaOrmCatalog;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_app_serves_health_and_pages() {
        let temp_dir = TempDir::new().unwrap();
        let conn = db::init_database(&temp_dir.path().join("warehouse.db"))
            .await
            .unwrap();
        let state = Arc::new(AppState::new(Arc::new(SeaOrmCatalog::new(Arc::new(conn)))));
        let router = app(state);

        for (uri, expected) in [
            ("/health", StatusCode::OK),
            ("/", StatusCode::OK),
            ("/cars/1/", StatusCode::NOT_FOUND),
            ("/nowhere", StatusCode::NOT_FOUND),
        ] {
            let resp = router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), expected, "GET {}", uri);
        }
    }
}
