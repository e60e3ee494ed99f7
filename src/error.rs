use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Car not found: {0}")]
    CarNotFound(i32),

    #[error("Filter not found: {0}")]
    FilterNotFound(i32),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServerError::CarNotFound(_) | ServerError::FilterNotFound(_))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::CarNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::FilterNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Duplicate(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::Database(_)
            | ServerError::Template(_)
            | ServerError::Config(_)
            | ServerError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServerError::CarNotFound(1).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ServerError::FilterNotFound(1).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServerError::Validation("year".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Duplicate("car".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_kinds() {
        assert!(ServerError::CarNotFound(7).is_not_found());
        assert!(ServerError::FilterNotFound(7).is_not_found());
        assert!(!ServerError::Validation("x".into()).is_not_found());
    }
}
