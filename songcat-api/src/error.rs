//! Error types for songcat-api
//!
//! Every error response carries `{"error": {"code", "message"}}` where
//! `code` is a stable machine-readable kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request outside the catalog's own validation (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Catalog operation failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<songcat_common::Error> for ApiError {
    fn from(err: songcat_common::Error) -> Self {
        ApiError::Catalog(CatalogError::from(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(err) => match err {
                CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
                CatalogError::EnrichmentUnavailable(_)
                | CatalogError::EnrichmentRejected { .. }
                | CatalogError::EnrichmentMalformedResponse(_)
                | CatalogError::StorageUnavailable(_)
                | CatalogError::StorageWriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "INVALID_ARGUMENT",
            ApiError::Catalog(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Catalog(err) => err.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
