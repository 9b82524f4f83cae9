use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::BackendError;
use crate::document::{errors::DocumentError, service::DocumentGateway};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<DocumentGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<DocumentGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        let message = err.to_string();
        match err {
            DocumentError::InvalidInput(_) => AppError::BadRequest(message),
            DocumentError::AccessDenied { .. } => AppError::Forbidden(message),
            DocumentError::OwnerProtection { .. } => AppError::Conflict(message),
            DocumentError::Remote(BackendError::NotFound(_)) => AppError::NotFound(message),
            DocumentError::Remote(_) => AppError::Upstream(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
