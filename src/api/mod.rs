//! Shared application state and service endpoints.

use std::sync::Arc;

use axum::{response::IntoResponse, Json};

use crate::catalog::CatalogRepository;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }
}

/// Liveness check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let resp = health().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }
}
