use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A field failed a range check. The payload is the client-facing reason.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Serialize)]
struct ValidationErrorBody {
    status: &'static str,
    reason: String,
}

#[derive(Serialize)]
struct InternalErrorBody {
    success: bool,
    error_log: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    status: "validation_error",
                    reason,
                }),
            )
                .into_response(),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Unhandled error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalErrorBody {
                        success: false,
                        error_log: err.to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalErrorBody {
                        success: false,
                        error_log: format!("Configuration error: {}", err),
                    }),
                )
                    .into_response()
            }
        }
    }
}
