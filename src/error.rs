use crate::api::{ServerErrorResponse, ValidationErrorResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The two failure kinds a request can surface: client data failing the
/// field rules, and everything else in the store path.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("store error")]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        match self {
            SubmissionError::Validation(errors) => {
                tracing::info!(errors = ?errors, "rejected submission");
                (StatusCode::BAD_REQUEST, Json(ValidationErrorResponse::new(errors))).into_response()
            }
            SubmissionError::Store(e) => {
                tracing::error!(error = %e, "store call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ServerErrorResponse::new())).into_response()
            }
        }
    }
}
