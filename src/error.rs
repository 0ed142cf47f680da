use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy.
///
/// Validation and NotFound are caller errors (400). Extraction and
/// Storage are server errors (500); their underlying causes are logged
/// but never exposed in the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to scrape product data")]
    Extraction(#[source] anyhow::Error),

    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn storage(message: impl Into<String>, source: anyhow::Error) -> Self {
        ApiError::Storage {
            message: message.into(),
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) | ApiError::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match &self {
            ApiError::Extraction(source) => error!("Scrape failed: {:#}", source),
            ApiError::Storage { source, .. } => error!("Storage operation failed: {:#}", source),
            _ => {}
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
