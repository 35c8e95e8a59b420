//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diabetes_core::PredictError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Application-level errors with HTTP status code mapping.
#[derive(Error, Debug, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl From<PredictError> for AppError {
    fn from(e: PredictError) -> Self {
        let message = e.to_string();
        match e {
            PredictError::MalformedRecord(_) => {
                warn!("Rejected prediction request: {}", message);
                AppError::BadRequest(message)
            }
            PredictError::ArtifactUnavailable => AppError::Internal(message),
            PredictError::InferenceFailure(_) => {
                error!("Inference failed: {}", message);
                AppError::Internal(message)
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        warn!("Rejected unparsable request body: {}", e);
        AppError::BadRequest(format!("invalid JSON body: {}", e))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
