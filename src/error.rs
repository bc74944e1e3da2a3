use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::db::StoreError;
use crate::models::ValidationError;

/// Handler-boundary errors. Underlying messages are passed to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unexpected failure while reading.
    #[error("{0}")]
    ServerFault(String),

    /// Rejected write or malformed request.
    #[error("{0}")]
    ClientFault(String),

    #[error("{0}")]
    NotFound(&'static str),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn server(err: impl std::fmt::Display) -> Self {
        Self::ServerFault(err.to_string())
    }

    pub fn client(err: impl std::fmt::Display) -> Self {
        Self::ClientFault(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::client(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::client(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::client(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ServerFault(message) => {
                error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
                    .into_response()
            }
            AppError::ClientFault(message) => {
                warn!(error = %message, "Request rejected");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}

// Failed reads are server faults, failed writes are client faults.
impl StoreError {
    pub fn on_read(self) -> AppError {
        AppError::server(self)
    }

    pub fn on_write(self) -> AppError {
        AppError::client(self)
    }
}
